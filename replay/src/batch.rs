//! Parallel analysis of many matches

use rayon::prelude::*;
use tracing::{debug, warn};

use replaydex_battle::{AnalysisError, MatchReport, analyze};

use crate::ReplayDocument;
use crate::aggregate::{AggregateOptions, BatchSummary, CrossMatchAggregator};

/// Analyze every log in parallel, then fold the reports in input order.
///
/// Matches that fail analysis are logged, counted in `matches_failed` and
/// left out of the totals.
pub fn analyze_batch<S>(logs: &[S], options: AggregateOptions) -> BatchSummary
where
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<MatchReport, AnalysisError>> =
        logs.par_iter().map(|log| analyze(log.as_ref())).collect();

    fold_results(results.into_iter().map(|result| (None, result)), options)
}

/// Same as [`analyze_batch`] for loaded replay documents
pub fn analyze_documents(documents: &[ReplayDocument], options: AggregateOptions) -> BatchSummary {
    let results: Vec<Result<MatchReport, AnalysisError>> = documents
        .par_iter()
        .map(ReplayDocument::analyze)
        .collect();

    fold_results(
        documents
            .iter()
            .map(|doc| Some(doc.id.as_str()))
            .zip(results),
        options,
    )
}

fn fold_results<'a>(
    results: impl Iterator<Item = (Option<&'a str>, Result<MatchReport, AnalysisError>)>,
    options: AggregateOptions,
) -> BatchSummary {
    let mut aggregator = CrossMatchAggregator::new(options);

    for (index, (id, result)) in results.enumerate() {
        let id = id.filter(|id| !id.is_empty()).unwrap_or("-");
        match result {
            Ok(report) => {
                debug!(index, id, turns = report.turns, "match analyzed");
                aggregator.add(&report);
            }
            Err(e) => {
                warn!(index, id, error = %e, "excluding match from batch");
                aggregator.record_failure();
            }
        }
    }

    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_log(p1_username: &str, chomp_damage: u32) -> String {
        let remaining = 100 - chomp_damage;
        format!(
            "|player|p1|{p1_username}|1|
|player|p2|Rival|2|
|poke|p1|Garchomp, F|
|poke|p2|Toxapex|
|start
|switch|p1a: Chomp|Garchomp, F|100/100
|switch|p2a: Pex|Toxapex|100/100
|turn|1
|move|p1a: Chomp|Earthquake|p2a: Pex
|-damage|p2a: Pex|{remaining}/100
|turn|2
|win|{p1_username}"
        )
    }

    #[test]
    fn test_garchomp_across_two_matches() {
        let logs = vec![match_log("Alice", 30), match_log("Carol", 50)];
        let summary = analyze_batch(&logs, AggregateOptions::default());

        assert_eq!(summary.matches_analyzed, 2);
        assert_eq!(summary.matches_failed, 0);

        let chomp = summary.species("Garchomp").unwrap();
        assert_eq!(chomp.games_played, 2);
        assert_eq!(chomp.wins, 2);
        assert_eq!(chomp.damage_dealt.direct, 80.0);
        assert_eq!(chomp.per_game.damage_dealt.direct, 40.0);
        assert_eq!(chomp.per_game.damage_dealt.total, chomp.damage_dealt.total / 2.0);

        let pex = summary.species("Toxapex").unwrap();
        assert_eq!(pex.damage_taken.direct, 80.0);
        assert_eq!(pex.wins, 0);
    }

    #[test]
    fn test_failed_match_excluded() {
        let logs = vec![
            match_log("Alice", 30),
            "|poke|p1|Garchomp|\n|start".to_string(),
            String::new(),
        ];
        let summary = analyze_batch(&logs, AggregateOptions::default());

        assert_eq!(summary.matches_analyzed, 1);
        assert_eq!(summary.matches_failed, 2);
        assert_eq!(summary.species("Garchomp").unwrap().games_played, 1);
    }

    #[test]
    fn test_batch_is_order_independent() {
        let logs = vec![match_log("Alice", 30), match_log("Carol", 50), match_log("Dave", 10)];
        let mut reversed = logs.clone();
        reversed.reverse();

        assert_eq!(
            analyze_batch(&logs, AggregateOptions::default()),
            analyze_batch(&reversed, AggregateOptions::default())
        );
    }

    #[test]
    fn test_documents() {
        let documents = vec![
            ReplayDocument {
                id: "gen9ou-1".to_string(),
                ..ReplayDocument::from_log(match_log("Alice", 20))
            },
            ReplayDocument::from_log(""),
        ];
        let summary = analyze_documents(&documents, AggregateOptions::default());

        assert_eq!(summary.matches_analyzed, 1);
        assert_eq!(summary.matches_failed, 1);
    }
}
