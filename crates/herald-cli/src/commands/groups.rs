use anyhow::Result;
use herald_application::{ConsoleUseCase, ConsoleView};
use herald_core::config::RefreshMode;
use herald_core::roster::Roster;

pub async fn run(console: &ConsoleUseCase) -> Result<()> {
    let view = console.refresh(ConsoleView::new(), RefreshMode::Auto).await;

    if let Some(hint) = view.roster_hint() {
        println!("{}", hint);
        return Ok(());
    }
    for line in listing(&view.roster) {
        println!("{}", line);
    }
    Ok(())
}

/// One numbered line per group; the number is accepted by `--group`.
pub fn listing(roster: &Roster) -> Vec<String> {
    roster
        .groups()
        .iter()
        .enumerate()
        .map(|(i, group)| format!("{:>3}. {}  [{}]", i + 1, group.name, group.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::roster::TargetGroup;

    #[test]
    fn test_listing_is_numbered_in_roster_order() {
        let roster = Roster::new(vec![
            TargetGroup::new("120363@g.us", "Family"),
            TargetGroup::new("120364@g.us", "Work"),
        ]);
        assert_eq!(
            listing(&roster),
            vec!["  1. Family  [120363@g.us]", "  2. Work  [120364@g.us]"]
        );
    }
}
