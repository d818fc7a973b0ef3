//! Fixtures for tests: sample payload types and families.
use std::io::IsTerminal as _;

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{Config, Family};

/// Installs a tracing subscriber writing to the test output.
/// Filtered by `RUST_LOG`; safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .with_ansi(std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal())
        .with_line_number(true)
        .try_init();
}

/// Point on a plane, compared by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Horizontal position.
    pub x: i64,
    /// Vertical position.
    pub y: i64,
}

impl Coordinate {
    /// Constructs a coordinate.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Distribution<Coordinate> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        Coordinate::new(rng.gen_range(-100..100), rng.gen_range(-100..100))
    }
}

/// Book, compared by title.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Book {
    /// Title of the book.
    pub title: String,
}

impl Book {
    /// Constructs a book.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
        }
    }
}

/// `WebEvent { PageLoad, PageUnload, Paste(String), Click(Coordinate) }`.
pub fn web_event() -> Family {
    Family::builder("WebEvent")
        .unit("PageLoad")
        .unit("PageUnload")
        .typed::<String>("Paste")
        .typed::<Coordinate>("Click")
        .build()
}

/// `Color { Red = "#ff0000", Green = "#00ff00", Blue = "#0000ff" }`.
pub fn color() -> Family {
    Family::builder("Color")
        .discriminator("Red", "#ff0000")
        .discriminator("Green", "#00ff00")
        .discriminator("Blue", "#0000ff")
        .build()
}

/// `Subject { Math(Book), Literature(Book), Science(Book), PhyEd }`
/// with the constant `ANSWER_TO_LIFE_UNIVERSE_AND_EVERYTHING = 42`.
pub fn subject(config: Config) -> Family {
    Family::builder("Subject")
        .with_config(config)
        .typed::<Book>("Math")
        .typed::<Book>("Literature")
        .typed::<Book>("Science")
        .unit("PhyEd")
        .constant("ANSWER_TO_LIFE_UNIVERSE_AND_EVERYTHING", 42_i64)
        .build()
}
