//! Assess Sample Sites
//!
//! Runs the suitability engine over the hardcoded sample sites and prints a
//! short report per site, followed by the batch aggregate. Pass `--json` to
//! print the full results as JSON instead.
//!
//! Run with: cargo run --bin assess_sample_sites [-- --json]

use pepper_suitability::suitability::sample_sites::sample_sites;
use pepper_suitability::{evaluate_batch, BatchSummary, ScoringProfile, SiteInput};

fn main() -> anyhow::Result<()> {
    let as_json = std::env::args().any(|a| a == "--json");

    let profile = match std::env::var("SCORING_PROFILE") {
        Ok(path) => ScoringProfile::load(std::path::Path::new(&path))?,
        Err(_) => ScoringProfile::canonical(),
    };

    let sites = sample_sites();
    let inputs: Vec<SiteInput> = sites.iter().map(|s| s.input).collect();
    let results = evaluate_batch(&profile, &inputs);

    if as_json {
        let report: Vec<serde_json::Value> = sites
            .iter()
            .zip(&results)
            .map(|(site, result)| match result {
                Ok(r) => serde_json::json!({ "site": site, "result": r }),
                Err(e) => serde_json::json!({ "site": site, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Black Pepper Site Suitability ({})\n", profile.name());
    println!("=================================\n");

    for (site, result) in sites.iter().zip(&results) {
        println!("## {}", site.name);
        match result {
            Ok(r) => {
                let display = r.rating.display();
                println!("  Score: {} {} {}", r.overall_score, display.icon, display.label);
                for score in &r.factor_scores {
                    println!(
                        "    {:<12} {:>8.2} {:<20} sub-score {:>5.1} × {:.2}",
                        score.factor.display_name(),
                        score.raw_value,
                        score.factor.unit(),
                        score.sub_score,
                        score.weight
                    );
                }
                for rec in &r.recommendations {
                    println!("    [{:?}] {}: {}", rec.severity, rec.title, rec.message);
                }
            }
            Err(e) => println!("  Invalid input: {}", e),
        }
        println!();
    }

    let summary = BatchSummary::from_results(&results);
    println!("=================================");
    println!(
        "{} sites, average score {}, {} suitable",
        summary.total, summary.average_score, summary.suitable_count
    );

    Ok(())
}
