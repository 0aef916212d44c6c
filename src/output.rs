//! Terminal rendering of race results.

use std::time::Duration;

use color_eyre::Result;
use hedged_cep_client::{RaceResult, Success};
use serde_json::json;

pub fn print_human(result: &RaceResult) {
    if let Some(winner) = result.winner() {
        print_winner(winner);
        return;
    }

    if let Some(err) = result.validation_error() {
        eprintln!("Error: {err}");
        return;
    }

    if result.timed_out {
        eprintln!(
            "Error: no provider answered within {} ms.",
            result.deadline.as_millis()
        );
    } else if result.dispatched == 0 {
        eprintln!("Error: no providers configured.");
    } else {
        eprintln!("Error: all {} providers failed.", result.dispatched);
    }

    for failure in &result.failures {
        let provider = failure.provider.map(|p| p.0).unwrap_or("-");
        eprintln!(
            "  {provider}: {} ({} ms)",
            failure.error,
            failure.elapsed.as_millis()
        );
    }
}

fn print_winner(winner: &Success) {
    let addr = &winner.address;

    println!(
        "Fastest provider: {} ({} ms)",
        winner.provider,
        winner.elapsed.as_millis()
    );
    println!("Address:");
    println!("  CEP:          {}", addr.postal_code());
    println!("  State:        {}", addr.region());
    println!("  City:         {}", addr.city());
    println!("  Neighborhood: {}", addr.district());
    println!("  Street:       {}", addr.street());
}

pub fn print_json(result: &RaceResult) -> Result<()> {
    let value = match result.winner() {
        Some(winner) => json!({
            "provider": winner.provider.0,
            "elapsed_ms": millis(winner.elapsed),
            "address": winner.address,
        }),
        None => json!({
            "timed_out": result.timed_out,
            "dispatched": result.dispatched,
            "failures": result
                .failures
                .iter()
                .map(|f| json!({
                    "provider": f.provider.map(|p| p.0),
                    "kind": format!("{:?}", f.kind()),
                    "error": f.error.to_string(),
                    "elapsed_ms": millis(f.elapsed),
                }))
                .collect::<Vec<_>>(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(42)), 42);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
