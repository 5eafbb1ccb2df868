pub mod composer;
pub mod extractor;
pub mod providers;
