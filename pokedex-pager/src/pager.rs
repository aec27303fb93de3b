//! Windowed paging over location areas.

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use pokedex_cache::PokeCache;
use pokedex_core::constants::{
    DEFAULT_PAGE_SIZE, FIRST_AREA_ID, MAX_PAGE_SIZE, UNAVAILABLE_AREA_NAME,
};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::AreaFetcher;

/// Direction of a paging step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Next page (`map`)
    Forward,
    /// Previous page (`mapb`)
    Backward,
}

/// One area in a returned page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSlot {
    /// Page id
    pub id: u32,
    /// Area name, or a placeholder when unavailable
    pub name: String,
    /// True when the fetch failed or the entry could not be read back
    pub failed: bool,
}

/// A page of areas, always ordered by ascending id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AreaPage {
    /// Direction that produced this page
    pub direction: Direction,
    /// Areas in ascending id order
    pub slots: Vec<AreaSlot>,
    /// Number of ids fetched remotely for this page
    pub fetched: usize,
}

impl AreaPage {
    /// Area names in slot order.
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.name.as_str()).collect()
    }

    /// Page ids in slot order.
    pub fn ids(&self) -> Vec<u32> {
        self.slots.iter().map(|s| s.id).collect()
    }
}

/// Cursor over the location-area id space.
///
/// Each [`advance`](Self::advance) covers one window of `page_size` ids:
/// forward reads `[cursor, cursor + n)`, backward reads `[cursor - n, cursor)`.
/// Uncached ids are fetched concurrently, one task per id, and all tasks are
/// joined before the window is read back out of the cache.
pub struct AreaPager {
    cache: Arc<PokeCache>,
    fetcher: Arc<dyn AreaFetcher>,
    next_id: u32,
    page_size: u32,
}

impl AreaPager {
    /// Creates a pager at the first area with the default page size.
    pub fn new(cache: Arc<PokeCache>, fetcher: Arc<dyn AreaFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            next_id: FIRST_AREA_ID,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Next id a forward step would start from.
    pub fn cursor(&self) -> u32 {
        self.next_id
    }

    /// Areas per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The ids the next step in `direction` would cover, if any.
    pub fn window(&self, direction: Direction) -> Option<Range<u32>> {
        match direction {
            Direction::Forward => Some(self.next_id..self.next_id.saturating_add(self.page_size)),
            Direction::Backward => {
                if self.next_id <= FIRST_AREA_ID {
                    return None;
                }
                let start = self.next_id.checked_sub(self.page_size)?;
                (start >= FIRST_AREA_ID).then_some(start..self.next_id)
            }
        }
    }

    /// Moves one page in `direction` and returns its areas.
    ///
    /// Fails with [`PokedexError::NoPriorPage`] when there is nothing behind
    /// the cursor; the cursor is left untouched in that case. Fetch failures
    /// never fail the call: they are cached and flagged in the slot.
    #[instrument(skip(self), fields(cursor = self.next_id))]
    pub async fn advance(&mut self, direction: Direction) -> Result<AreaPage> {
        let window = self.window(direction).ok_or(PokedexError::NoPriorPage)?;

        let start = Instant::now();
        let fetched = self.populate(window.clone()).await;
        let slots = self.read_window(window.clone());

        self.next_id = match direction {
            Direction::Forward => window.end,
            Direction::Backward => window.start,
        };

        info!(
            first = window.start,
            last = window.end - 1,
            fetched,
            cursor = self.next_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded area page"
        );

        Ok(AreaPage {
            direction,
            slots,
            fetched,
        })
    }

    /// Fetches every uncached id in the window and waits for all of them.
    async fn populate(&self, window: Range<u32>) -> usize {
        let missing: Vec<u32> = window.filter(|id| self.cache.get(*id).is_none()).collect();
        if missing.is_empty() {
            debug!("Window fully cached");
            return 0;
        }

        debug!(count = missing.len(), "Fetching uncached areas");

        let mut tasks = JoinSet::new();
        for &id in &missing {
            let cache = Arc::clone(&self.cache);
            let fetcher = Arc::clone(&self.fetcher);
            tasks.spawn(async move { fill_area(&cache, fetcher.as_ref(), id).await });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Area fetch task did not complete");
            }
        }

        missing.len()
    }

    fn read_window(&self, window: Range<u32>) -> Vec<AreaSlot> {
        window
            .map(|id| match self.cache.get(id) {
                Some(entry) => AreaSlot {
                    id,
                    failed: entry.is_failed(),
                    name: entry.name,
                },
                None => {
                    warn!(id, "Area missing after fetch");
                    AreaSlot {
                        id,
                        name: UNAVAILABLE_AREA_NAME.to_string(),
                        failed: true,
                    }
                }
            })
            .collect()
    }
}

/// Fetches one area and writes it into the cache. No lock is held while fetching.
async fn fill_area(cache: &PokeCache, fetcher: &dyn AreaFetcher, id: u32) {
    match fetcher.fetch_area(id).await {
        Ok(area) => {
            cache.put(id, area.name);
            for creature in &area.creatures {
                cache.append_creature(id, creature);
                cache.record_discovery(creature);
            }
        }
        Err(e) => {
            warn!(id, error = %e, "Area fetch failed, caching as unavailable");
            cache.put_failed(id, e.to_string());
        }
    }
}
