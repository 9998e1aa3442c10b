//! Word catalog
//!
//! The catalog holds three word sets (plants, animals, colors), one per
//! [`Category`]. The built-in catalog is created once on first use and lives
//! for the rest of the process; it is never mutated, so concurrent readers need
//! no synchronization.
//!
//! ## Usage
//!
//! ```rust
//! use whimsy_core::catalog::{Catalog, Category};
//!
//! let catalog = Catalog::global();
//! let word = catalog.pick_random(Category::Animal).unwrap();
//! assert!(catalog.words(Category::Animal).contains(word));
//! ```

mod words;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::rng::{secure_rng, uniform_index};

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(
        WordSet::new(Category::Plant, words::PLANTS),
        WordSet::new(Category::Animal, words::ANIMALS),
        WordSet::new(Category::Color, words::COLORS),
    )
});

/// Word category
///
/// Replaces per-resource generator callables: every category knows its tag
/// and its word set, and dispatch over categories is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Plant names
    Plant,
    /// Animal names
    Animal,
    /// Color names
    Color,
}

impl Category {
    /// All categories, in tag order used by error messages
    pub const ALL: [Category; 3] = [Category::Plant, Category::Animal, Category::Color];

    /// The lowercase tag for this category
    pub fn tag(self) -> &'static str {
        match self {
            Category::Plant => "plant",
            Category::Animal => "animal",
            Category::Color => "color",
        }
    }

    /// Parse a sequence of tags, failing on the first unknown one
    ///
    /// Duplicates are kept: `["plant", "plant"]` yields two plant categories.
    pub fn parse_all<S: AsRef<str>>(tags: &[S]) -> Result<Vec<Category>> {
        tags.iter().map(|tag| tag.as_ref().parse()).collect()
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plant" => Ok(Category::Plant),
            "animal" => Ok(Category::Animal),
            "color" => Ok(Category::Color),
            other => Err(Error::unknown_category(other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An ordered, deduplicated set of lowercase words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSet {
    category: Category,
    words: &'static [&'static str],
}

impl WordSet {
    /// Wrap a static word list
    ///
    /// The list is not checked here; see [`WordSet::validate`].
    pub const fn new(category: Category, words: &'static [&'static str]) -> Self {
        Self { category, words }
    }

    /// The category this set belongs to
    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.words.get(index).copied()
    }

    /// Whether `word` is an exact member of the set
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| (*probe).cmp(word))
            .is_ok()
    }

    /// All words in order
    pub fn as_slice(&self) -> &'static [&'static str] {
        self.words
    }

    /// Iterate over the words in order
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.words.iter().copied()
    }

    /// Pick one word uniformly with the given generator
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'static str> {
        if self.words.is_empty() {
            return Err(Error::empty_word_set(self.category.tag()));
        }
        Ok(self.words[uniform_index(rng, self.words.len())])
    }

    /// Check the set invariants
    ///
    /// Every word is 1-6 characters of `[a-z]`, and words are strictly
    /// ascending (sorted with no duplicates).
    pub fn validate(&self) -> Result<()> {
        if self.words.is_empty() {
            return Err(Error::empty_word_set(self.category.tag()));
        }

        for word in self.words {
            if word.is_empty() || word.len() > 6 {
                return Err(Error::config(format!(
                    "{} word '{}' must be 1 to 6 characters long",
                    self.category, word
                )));
            }
            if !word.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(Error::config(format!(
                    "{} word '{}' contains characters outside [a-z]",
                    self.category, word
                )));
            }
        }

        if let Some(pair) = self.words.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Error::config(format!(
                "{} words are not strictly ascending: '{}' before '{}'",
                self.category, pair[0], pair[1]
            )));
        }

        Ok(())
    }
}

/// The three word sets
#[derive(Debug, Clone)]
pub struct Catalog {
    plants: WordSet,
    animals: WordSet,
    colors: WordSet,
}

impl Catalog {
    /// Create a catalog from explicit word sets
    pub fn new(plants: WordSet, animals: WordSet, colors: WordSet) -> Self {
        Self {
            plants,
            animals,
            colors,
        }
    }

    /// The built-in catalog, initialized on first access
    pub fn global() -> &'static Catalog {
        &BUILTIN
    }

    /// Word set for a category
    pub fn words(&self, category: Category) -> &WordSet {
        match category {
            Category::Plant => &self.plants,
            Category::Animal => &self.animals,
            Category::Color => &self.colors,
        }
    }

    /// Pick one word uniformly at random from a cryptographically strong source
    pub fn pick_random(&self, category: Category) -> Result<&'static str> {
        let words = self.words(category);
        if words.is_empty() {
            return Err(Error::empty_word_set(category.tag()));
        }
        let mut rng = secure_rng()?;
        words.choose(&mut rng)
    }

    /// Check every word set and that no word appears in two categories
    ///
    /// Disjointness lets a compound name be mapped back to the categories
    /// that produced it.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&'static str> = HashSet::new();
        for category in Category::ALL {
            let words = self.words(category);
            words.validate()?;
            if let Some(word) = words.iter().find(|word| !seen.insert(*word)) {
                return Err(Error::config(format!(
                    "word '{}' appears in more than one category",
                    word
                )));
            }
        }
        Ok(())
    }
}

/// Word set for a category in the built-in catalog
pub fn words(category: Category) -> &'static WordSet {
    Catalog::global().words(category)
}

/// Pick a random word for a category from the built-in catalog
pub fn pick_random(category: Category) -> Result<&'static str> {
    Catalog::global().pick_random(category)
}
