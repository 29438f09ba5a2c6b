//! S3: Food Synergies
//!
//! Emitted only when at least one documented pair is in the stack.

use crate::report::sections::section_title;
use crate::synergy::SynergyMatch;

/// Returns `None` when there is nothing to report.
pub fn generate(matches: &[SynergyMatch<'_>]) -> Option<String> {
    if matches.is_empty() {
        return None;
    }

    let mut blocks = vec![section_title("FOOD SYNERGIES")];

    for m in matches {
        let mut lines = Vec::new();
        match m.synergy.strength.as_deref() {
            Some(strength) if !strength.is_empty() => {
                lines.push(format!("✓ {} [{}]", m.title(), strength))
            }
            _ => lines.push(format!("✓ {}", m.title())),
        }
        lines.push(format!("  {}", m.synergy.description));
        if let Some(recommendation) = &m.synergy.recommendation {
            lines.push(format!("  Recommendation: {}", recommendation));
        }
        blocks.push(lines.join("\n"));
    }

    Some(blocks.join("\n\n"))
}
