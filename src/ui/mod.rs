pub mod blocks;
pub mod context;
pub mod error;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;

/// Wall-clock prefix for streamed event lines
pub fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
