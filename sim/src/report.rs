use gemelos_core::{RouteRecord, Survey};
use gemelos_types::{RouteOutcome, RoutingStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Aggregate routing statistics over a batch of sampled `(source, dest)`
/// pairs, plus the underlying network's structural survey.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub survey: Survey,
    pub samples: usize,
    pub success: usize,
    pub undefined: usize,
    pub hop_cap_exceeded: usize,
    pub success_rate: f64,
    /// `{status -> {hopCount -> frequency}}`: for every hop of every
    /// sampled route, the decision made at that hop (`RoutingStatus`) and
    /// the 1-based position it occurred at within its route's trail.
    pub hop_histogram: BTreeMap<RoutingStatus, BTreeMap<u32, u64>>,
}

impl SimulationReport {
    pub fn from_records(survey: Survey, records: &[RouteRecord]) -> Self {
        let samples = records.len();
        let mut success = 0;
        let mut undefined = 0;
        let mut hop_cap_exceeded = 0;
        let mut hop_histogram: BTreeMap<RoutingStatus, BTreeMap<u32, u64>> = BTreeMap::new();

        for record in records {
            match record.outcome {
                RouteOutcome::Success => success += 1,
                RouteOutcome::Undefined => undefined += 1,
                RouteOutcome::HopCapExceeded => hop_cap_exceeded += 1,
            }
            for (index, status) in record.trail.iter().enumerate() {
                let hop_count = index as u32 + 1;
                *hop_histogram
                    .entry(*status)
                    .or_default()
                    .entry(hop_count)
                    .or_insert(0) += 1;
            }
        }

        let success_rate = if samples == 0 {
            0.0
        } else {
            success as f64 / samples as f64 * 100.0
        };

        Self {
            survey,
            samples,
            success,
            undefined,
            hop_cap_exceeded,
            success_rate,
            hop_histogram,
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network:")?;
        writeln!(f, "  nodes:              {}", self.survey.node_count)?;
        writeln!(f, "  head cases:         {}", self.survey.head_cases)?;
        writeln!(f, "  boot cases:         {}", self.survey.boot_cases)?;
        writeln!(
            f,
            "  avg head club:      {:.2}",
            self.survey.avg_head_club_size
        )?;
        writeln!(
            f,
            "  avg boot club:      {:.2}",
            self.survey.avg_boot_club_size
        )?;
        writeln!(
            f,
            "  head coverage:      {:.2}% ({} nodes)",
            self.survey.head_coverage, self.survey.covered_by_head
        )?;
        writeln!(
            f,
            "  boot coverage:      {:.2}% ({} nodes)",
            self.survey.boot_coverage, self.survey.covered_by_boot
        )?;
        writeln!(f)?;
        writeln!(f, "routing ({} samples):", self.samples)?;
        writeln!(
            f,
            "  success:            {} ({:.2}%)",
            self.success, self.success_rate
        )?;
        writeln!(f, "  undefined:          {}", self.undefined)?;
        writeln!(f, "  hop-cap exceeded:   {}", self.hop_cap_exceeded)?;
        writeln!(f)?;
        writeln!(f, "hop histogram (status -> hop count -> frequency):")?;
        for (status, by_hop) in &self.hop_histogram {
            writeln!(f, "  {status}:")?;
            for (hop_count, frequency) in by_hop {
                writeln!(f, "    {hop_count:>3} hops: {frequency}")?;
            }
        }
        Ok(())
    }
}
