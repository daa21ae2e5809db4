pub mod changelog;

pub use changelog::ChangelogParser;
