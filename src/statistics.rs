use std::fmt;
use std::time::Duration;

/// Work counters for a single search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells popped and finalized.
    pub expanded: usize,
    /// Entries pushed onto the frontier, duplicates included.
    pub pushes: u64,
    /// Popped entries discarded because their cell was already final.
    pub stale_pops: usize,
    /// Cells that received a finite distance.
    pub reached: usize,
    /// Cells on the returned path, if one was found.
    pub path_len: Option<usize>,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_len {
            Some(len) => writeln!(f, "Path: {} cells ({} steps)", len, len.saturating_sub(1))?,
            None => writeln!(f, "Path: unreachable")?,
        }
        writeln!(f, "Cells expanded: {}", self.expanded)?;
        writeln!(f, "Cells reached: {}", self.reached)?;
        writeln!(f, "Frontier pushes: {}", self.pushes)?;
        writeln!(f, "Stale pops skipped: {}", self.stale_pops)?;
        Ok(())
    }
}

/// One engine's result inside a comparison run.
#[derive(Debug, Clone)]
pub struct EngineRun {
    pub name: &'static str,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Side-by-side summary of several engines on the same query.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub runs: Vec<EngineRun>,
}

impl Comparison {
    /// True when every engine found a path of the same length, or none did.
    pub fn lengths_agree(&self) -> bool {
        self.runs
            .windows(2)
            .all(|w| w[0].stats.path_len == w[1].stats.path_len)
    }

    /// Engine with the fewest expansions among those that found a path.
    pub fn fewest_expansions(&self) -> Option<&EngineRun> {
        self.runs
            .iter()
            .filter(|r| r.stats.path_len.is_some())
            .min_by_key(|r| r.stats.expanded)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<15} {:<8} {:<8} {:<10} {:<10} {:<8} {:<12}",
            "Algorithm", "Found", "Steps", "Expanded", "Pushes", "Stale", "Time"
        )?;
        writeln!(f, "{}", "-".repeat(75))?;

        for run in &self.runs {
            let found = if run.stats.path_len.is_some() { "yes" } else { "no" };
            let steps = run
                .stats
                .path_len
                .map_or_else(|| "-".to_string(), |len| (len - 1).to_string());
            writeln!(
                f,
                "{:<15} {:<8} {:<8} {:<10} {:<10} {:<8} {:<12}",
                run.name,
                found,
                steps,
                run.stats.expanded,
                run.stats.pushes,
                run.stats.stale_pops,
                format!("{:.2?}", run.elapsed)
            )?;
        }

        if self.runs.len() > 1 {
            if self.lengths_agree() {
                writeln!(f, "Path lengths agree")?;
            } else {
                writeln!(f, "WARNING: path lengths differ between algorithms")?;
            }
            if let Some(best) = self.fewest_expansions() {
                writeln!(f, "Fewest expansions: {} ({})", best.name, best.stats.expanded)?;
            }
        }
        Ok(())
    }
}
