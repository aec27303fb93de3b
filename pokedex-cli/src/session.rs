//! Command handlers for one interactive session.

use std::io::Write;
use std::sync::Arc;

use colored::*;

use pokedex_cache::PokeCache;
use pokedex_core::error::{PokedexError, Result};
use pokedex_pager::{AreaPager, CatchOutcome, Direction, Trainer};

use crate::commands::{Command, HELP_TEXT};

/// Whether the REPL should keep reading after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Pager, trainer and cache for one player.
pub struct Session {
    cache: Arc<PokeCache>,
    pager: AreaPager,
    trainer: Trainer,
}

impl Session {
    pub fn new(cache: Arc<PokeCache>, pager: AreaPager, trainer: Trainer) -> Self {
        Self {
            cache,
            pager,
            trainer,
        }
    }

    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Map => self.page(Direction::Forward, out).await?,
            Command::MapBack => self.page(Direction::Backward, out).await?,
            Command::Explore(area) => self.explore(&area, out)?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out).await?,
            Command::Pokedex => self.pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    async fn page<W: Write>(&mut self, direction: Direction, out: &mut W) -> Result<()> {
        let page = self.pager.advance(direction).await?;
        for slot in &page.slots {
            if slot.failed {
                writeln!(out, "{}", format!("{} (#{})", slot.name, slot.id).red().dimmed())?;
            } else {
                writeln!(out, "{}", slot.name)?;
            }
        }
        Ok(())
    }

    fn explore<W: Write>(&self, area: &str, out: &mut W) -> Result<()> {
        let entry = self
            .cache
            .find_area(area)
            .ok_or_else(|| PokedexError::UnknownArea(area.to_string()))?;

        if let pokedex_core::AreaStatus::Failed { reason } = &entry.status {
            return Err(PokedexError::FetchFailed {
                target: format!("location-area {}", entry.id),
                reason: reason.clone(),
            });
        }

        writeln!(out, "Exploring {}...", entry.name.cyan())?;
        if entry.creatures.is_empty() {
            writeln!(out, "No Pokemon found here.")?;
            return Ok(());
        }

        writeln!(out, "{}", "Found Pokemon:".green().bold())?;
        for creature in &entry.creatures {
            writeln!(out, " - {}", creature)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let outcome = self.trainer.catch(name).await?;

        writeln!(out, "Throwing a Pokeball at {}...", name.bold())?;
        match outcome {
            CatchOutcome::Caught => {
                writeln!(out, "{}", format!("{} was caught!", name).green())?;
                writeln!(out, "You may now inspect it with the inspect command.")?;
            }
            CatchOutcome::Escaped => writeln!(out, "{}", format!("{} escaped!", name).yellow())?,
            CatchOutcome::AlreadyCaught => {
                writeln!(out, "{} is already in your Pokedex.", name)?
            }
        }
        Ok(())
    }

    async fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let stats = self.trainer.inspect(name).await?;

        writeln!(out, "{} {}", "Name:".dimmed(), name.trim().to_lowercase().bold())?;
        writeln!(out, "{} {}", "Height:".dimmed(), stats.height)?;
        writeln!(out, "{} {}", "Weight:".dimmed(), stats.weight)?;
        writeln!(out, "{}", "Stats:".dimmed())?;
        for (label, value) in stats.stat_lines() {
            writeln!(out, "  -{}: {}", label, value)?;
        }
        writeln!(out, "{}", "Types:".dimmed())?;
        for kind in &stats.types {
            writeln!(out, "  - {}", kind)?;
        }
        Ok(())
    }

    fn pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        let caught = self.trainer.pokedex();
        if caught.is_empty() {
            writeln!(out, "Your Pokedex is empty. Go catch something!")?;
            return Ok(());
        }

        writeln!(out, "{}", "Your Pokedex:".green().bold())?;
        for name in caught {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use pokedex_core::traits::{AreaFetcher, CreatureFetcher};
    use pokedex_core::types::{CreatureStats, FetchedArea};

    /// Area `n` is "area-n" holding "mon-n"; area 3 fails; every creature is easy to catch.
    struct FakeApi;

    #[async_trait]
    impl AreaFetcher for FakeApi {
        async fn fetch_area(&self, id: u32) -> Result<FetchedArea> {
            if id == 3 {
                return Err(PokedexError::HttpError("connection reset".into()));
            }
            Ok(FetchedArea::new(format!("area-{}", id), vec![format!("mon-{}", id)]))
        }
    }

    #[async_trait]
    impl CreatureFetcher for FakeApi {
        async fn fetch_creature(&self, _name: &str) -> Result<CreatureStats> {
            Ok(CreatureStats {
                base_experience: 0,
                height: 4,
                weight: 60,
                hp: 35,
                types: vec!["electric".into()],
                ..Default::default()
            })
        }
    }

    fn session() -> Session {
        let cache = Arc::new(PokeCache::new());
        let api = Arc::new(FakeApi);
        let pager = AreaPager::new(cache.clone(), api.clone()).with_page_size(4);
        let trainer = Trainer::with_seed(cache.clone(), api, 42);
        Session::new(cache, pager, trainer)
    }

    async fn run(session: &mut Session, line: &str) -> Result<String> {
        let mut out = Vec::new();
        let command = Command::parse(line)?.expect("non-blank command");
        session.execute(command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_map_lists_page() {
        let mut session = session();

        let output = run(&mut session, "map").await.unwrap();
        assert!(output.contains("area-1"));
        assert!(output.contains("area-4"));
        assert!(output.contains("#3"));

        let output = run(&mut session, "map").await.unwrap();
        assert!(output.contains("area-5"));
    }

    #[tokio::test]
    async fn test_mapb_before_map() {
        let mut session = session();
        let err = run(&mut session, "mapb").await.unwrap_err();
        assert!(matches!(err, PokedexError::NoPriorPage));
    }

    #[tokio::test]
    async fn test_explore_reads_cache_only() {
        let mut session = session();

        assert!(matches!(
            run(&mut session, "explore area-2").await,
            Err(PokedexError::UnknownArea(_))
        ));

        run(&mut session, "map").await.unwrap();
        let output = run(&mut session, "explore area-2").await.unwrap();
        assert!(output.contains("mon-2"));

        let output = run(&mut session, "explore 4").await.unwrap();
        assert!(output.contains("mon-4"));

        assert!(matches!(
            run(&mut session, "explore 3").await,
            Err(PokedexError::FetchFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_catch_inspect_pokedex_flow() {
        let mut session = session();

        assert!(matches!(
            run(&mut session, "catch mon-1").await,
            Err(PokedexError::UnknownCreature(_))
        ));

        run(&mut session, "map").await.unwrap();
        assert!(matches!(
            run(&mut session, "inspect mon-1").await,
            Err(PokedexError::NotCapturedYet(_))
        ));

        let mut caught = false;
        for _ in 0..20 {
            let output = run(&mut session, "catch mon-1").await.unwrap();
            if output.contains("was caught") || output.contains("already") {
                caught = true;
                break;
            }
        }
        assert!(caught);

        let output = run(&mut session, "inspect mon-1").await.unwrap();
        assert!(output.contains("-hp: 35"));
        assert!(output.contains("electric"));

        let output = run(&mut session, "pokedex").await.unwrap();
        assert!(output.contains("mon-1"));
        assert!(!output.contains("mon-2"));
    }

    #[tokio::test]
    async fn test_help_and_exit() {
        let mut session = session();
        let output = run(&mut session, "help").await.unwrap();
        assert!(output.contains("mapb"));

        let mut out = Vec::new();
        let flow = session.execute(Command::Exit, &mut out).await.unwrap();
        assert_eq!(flow, Flow::Exit);
    }

    #[tokio::test]
    async fn test_empty_pokedex() {
        let mut session = session();
        let output = run(&mut session, "pokedex").await.unwrap();
        assert!(output.contains("empty"));
    }
}
