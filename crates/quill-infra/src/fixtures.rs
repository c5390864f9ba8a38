//! Random blog post generator for seeding and tests.
//!
//! Content depends only on the seed and the epoch, so a seeded generator
//! produces the same posts on every run. Ids are always fresh v4 UUIDs and
//! never come from the seed.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use quill_core::domain::{Author, BlogPost};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Hedy", "Ivan",
    "Joan", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Shafi", "Tim", "Whitfield", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Berners-Lee", "Dijkstra", "Diffie", "Hopper", "Kay", "Knuth", "Lamarr", "Liskov",
    "Lovelace", "Matsumoto", "Perlman", "Ritchie", "Shannon", "Sutherland", "Thompson", "Torvalds",
    "Turing", "Wirth", "Goldwasser",
];

const TITLE_WORDS: &[&str] = &[
    "async", "borrow", "cache", "compiler", "crate", "daemon", "engine", "garden", "harbor",
    "kernel", "lantern", "lifetime", "meadow", "orbit", "parser", "quartz", "river", "socket",
    "summit", "thread", "trait", "vector", "willow", "zephyr",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat",
];

/// Window before the epoch in which generated `created` timestamps fall.
const CREATED_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

/// Deterministic, seedable source of fake blog posts.
pub struct PostGenerator {
    rng: StdRng,
    epoch: DateTime<Utc>,
}

impl PostGenerator {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            epoch: Utc::now(),
        }
    }

    /// A generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            epoch: Utc::now(),
        }
    }

    /// Anchor generated timestamps to `epoch` instead of the construction time.
    pub fn with_epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch = epoch;
        self
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words[self.rng.gen_range(0..words.len())]
    }

    pub fn author(&mut self) -> Author {
        Author::new(self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    /// Three random words separated by spaces.
    pub fn title(&mut self) -> String {
        (0..3)
            .map(|_| self.pick(TITLE_WORDS))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A lorem ipsum paragraph of three to six sentences.
    pub fn content(&mut self) -> String {
        let sentences = self.rng.gen_range(3..=6);
        (0..sentences)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sentence(&mut self) -> String {
        let len = self.rng.gen_range(5..=12);
        let words: Vec<&str> = (0..len).map(|_| self.pick(LOREM)).collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    pub fn post(&mut self) -> BlogPost {
        let age = self.rng.gen_range(0..CREATED_WINDOW_SECS);

        BlogPost {
            id: Uuid::new_v4(),
            author: self.author(),
            title: self.title(),
            content: self.content(),
            created: self.epoch - Duration::seconds(age),
        }
    }

    pub fn posts(&mut self, count: usize) -> Vec<BlogPost> {
        (0..count).map(|_| self.post()).collect()
    }
}

/// Insert `count` generated posts into `repo` and return them.
pub async fn seed_posts(
    repo: &dyn PostRepository,
    generator: &mut PostGenerator,
    count: usize,
) -> Result<Vec<BlogPost>, RepoError> {
    let posts = generator.posts(count);
    tracing::info!(count, "Seeding blog posts");
    repo.insert_many(posts.clone()).await?;
    Ok(posts)
}
