//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod carousel;
pub mod episodes;
pub mod hero;
pub mod screen;
pub mod search;
pub mod show_header;
pub mod theme;

pub use carousel::CarouselView;
pub use episodes::EpisodeViewer;
pub use hero::HeroSlider;
pub use screen::render;
pub use theme::Theme;
