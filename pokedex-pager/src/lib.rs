//! # Pokedex Pager
//!
//! Paging and capture on top of the shared [`PokeCache`](pokedex_cache::PokeCache).
//!
//! ## Features
//!
//! - **Windowed paging**: `map` / `mapb` move a cursor one page at a time
//! - **Concurrent population**: every uncached id in a window is fetched in its own task
//! - **Failure caching**: a failed fetch is cached until it expires instead of retried
//! - **Capture**: lazy stat lookup plus a seeded capture roll
//!
//! ## Example
//!
//! ```rust,ignore
//! use pokedex_pager::{AreaPager, Direction};
//!
//! let mut pager = AreaPager::new(cache.clone(), client.clone());
//! let page = pager.advance(Direction::Forward).await?;
//!
//! for slot in &page.slots {
//!     println!("{}", slot.name);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod pager;
mod trainer;

pub use pager::{AreaPage, AreaPager, AreaSlot, Direction};
pub use trainer::{CatchOutcome, Trainer};
