use std::path::Path;

use crewgen_core::{
    catalog::{MissionSet, ALL_MISSION_SETS},
    generator::Generation,
    selector::{ChosenMission, MatchQuality, SelectionResult},
    GeneratorError,
};
use crossterm::style::Stylize;

pub fn print_generation(generation: &Generation, mission_sets: &[String]) {
    println!(
        "{}",
        format!(
            "Mission draw for {} players, target difficulty {} ({})",
            generation.players,
            generation.requested_target,
            mission_sets.join(" + ")
        )
        .bold()
    );

    if !generation.modifiers.is_empty() {
        println!();
        println!(
            "{}",
            format!("Active modifiers (-{}):", generation.modifier_total()).cyan()
        );
        for modifier in &generation.modifiers {
            println!(
                "  {} ({})",
                modifier.display_name().bold(),
                modifier.difficulty_modifier.for_players(generation.players)
            );
            if !modifier.rules_text.trim().is_empty() {
                println!("    {}", modifier.rules_text.as_str().dark_grey());
            }
        }
        println!("Remaining difficulty for missions: {}", generation.mission_target);
    }

    let selection = &generation.selection;
    if !selection.is_match() {
        println!();
        println!("{}", no_match_advice(generation.mission_target).yellow());
        return;
    }

    println!();
    for chosen in &selection.chosen {
        println!("  {}", mission_line(chosen));
    }
    println!();
    println!(
        "Total {} of {}: {}",
        selection.total(),
        generation.mission_target,
        styled_quality(selection)
    );
    if let Some(stats) = selection.draw_stats {
        println!(
            "{}",
            format!(
                "Drew {} cards, set aside {}.",
                stats.cards_drawn, stats.skipped
            )
            .dark_grey()
        );
    }
}

pub fn print_mission_sets(root: &Path, sets: &[MissionSet]) {
    if sets.is_empty() {
        print_warning(&format!("No mission sets found in {}.", root.display()));
        return;
    }
    println!("{}", format!("Mission sets in {}:", root.display()).bold());
    for set in sets {
        println!("  {}", set.name);
    }
    println!("  {} {}", ALL_MISSION_SETS, "(every set combined)".dark_grey());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

pub fn print_configuration_error(err: &GeneratorError) {
    eprintln!("{} {}", "configuration error:".red().bold(), err);
}

fn mission_line(chosen: &ChosenMission) -> String {
    format!(
        "Mission {}: ({}) {}",
        chosen.id, chosen.difficulty, chosen.description
    )
}

fn quality_label(selection: &SelectionResult) -> String {
    let attempts = selection
        .match_info
        .map(|info| info.attempts)
        .unwrap_or_default();
    let plural = if attempts == 1 { "" } else { "s" };
    match selection.quality() {
        MatchQuality::Exact => format!("exact match after {attempts} attempt{plural}"),
        MatchQuality::Close => format!(
            "close match, {} short, after {attempts} attempt{plural}",
            selection.match_info.map(|info| info.distance).unwrap_or_default()
        ),
        MatchQuality::BestAvailable => format!(
            "best available, {} short, after {attempts} attempt{plural}",
            selection.match_info.map(|info| info.distance).unwrap_or_default()
        ),
        MatchQuality::NoMatch => "no match".to_string(),
    }
}

fn styled_quality(selection: &SelectionResult) -> String {
    let label = quality_label(selection);
    match selection.quality() {
        MatchQuality::Exact => label.green().to_string(),
        MatchQuality::Close => label.cyan().to_string(),
        MatchQuality::BestAvailable => label.yellow().to_string(),
        MatchQuality::NoMatch => label.red().to_string(),
    }
}

fn no_match_advice(target: i32) -> String {
    format!(
        "No combination of missions found for difficulty {target}. \
         Try a different target, another mission set, or fewer modifiers."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewgen_core::selector::MatchInfo;

    fn selection(info: Option<MatchInfo>) -> SelectionResult {
        SelectionResult {
            chosen: vec![ChosenMission {
                id: 12,
                difficulty: 3,
                description: "Win the green 9".to_string(),
            }],
            match_info: info,
            draw_stats: None,
        }
    }

    #[test]
    fn mission_line_matches_card_layout() {
        let selection = selection(None);
        assert_eq!(mission_line(&selection.chosen[0]), "Mission 12: (3) Win the green 9");
    }

    #[test]
    fn quality_labels_distinguish_outcomes() {
        let exact = selection(Some(MatchInfo {
            attempts: 1,
            exact_match: true,
            distance: 0,
            close_match: false,
        }));
        assert_eq!(quality_label(&exact), "exact match after 1 attempt");

        let close = selection(Some(MatchInfo {
            attempts: 4,
            exact_match: false,
            distance: 2,
            close_match: true,
        }));
        assert_eq!(quality_label(&close), "close match, 2 short, after 4 attempts");

        let best = selection(Some(MatchInfo {
            attempts: 100,
            exact_match: false,
            distance: 5,
            close_match: false,
        }));
        assert_eq!(
            quality_label(&best),
            "best available, 5 short, after 100 attempts"
        );

        assert_eq!(quality_label(&selection(None)), "no match");
    }

    #[test]
    fn advice_mentions_target() {
        assert!(no_match_advice(7).contains("difficulty 7"));
    }
}
