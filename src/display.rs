use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::config::LeagueConfig;
use crate::history::MatchHistory;
use crate::roster::{League, Player};
use crate::schedule::{AssignmentResult, Pod};

/// Formats a player line with faction tag and rating
pub fn format_player(player: &Player) -> String {
    let mut line = player.display_name();
    if let Some(faction) = &player.faction {
        line.push_str(&format!(" [{}]", faction));
    }
    if let Some(rating) = player.rating {
        line.push_str(&format!(" (Rating: {})", rating));
    }
    line
}

fn overflow_tag(pod: &Pod) -> &'static str {
    if pod.is_overflow {
        " (overflow)"
    } else {
        ""
    }
}

/// Writes pods and matches in the plain-text layout used for export and console
pub fn write_assignment<W: Write>(out: &mut W, result: &AssignmentResult, league: &League) -> io::Result<()> {
    writeln!(out, "** {} **", result.month)?;
    writeln!(out, "Generated: {} UTC", result.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Target Pod Size: {}", result.target_pod_size)?;
    writeln!(
        out,
        "{} pods, {} players, {} matches",
        result.pods.len(),
        result.total_players(),
        result.total_matches()
    )?;

    let games = result.games_per_player();
    for pod in &result.pods {
        writeln!(out)?;
        writeln!(out, "Pod {}{} - {} players:", pod.pod_id, overflow_tag(pod), pod.size())?;
        for player_id in &pod.player_ids {
            let played = games.get(player_id.as_str()).copied().unwrap_or(0);
            writeln!(out, "    {} ({} games)", league.display_name_of(player_id), played)?;
        }
        writeln!(out, "  Matches:")?;
        for m in &pod.matches {
            writeln!(out, "    - {}", m)?;
        }
    }

    if !result.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings ({}):", result.warnings.len())?;
        for warning in &result.warnings {
            writeln!(out, "  - {}", warning)?;
        }
    }

    Ok(())
}

/// Writes an assignment to a text file
pub fn write_assignment_to_file(
    result: &AssignmentResult,
    league: &League,
    path: &Path,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_assignment(&mut file, result, league)
}

/// Prints an assignment to stdout
pub fn print_assignment(result: &AssignmentResult, league: &League) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_assignment(&mut out, result, league)
}

/// Prints league details and the roster, sorted by name
pub fn print_league(league: &League) {
    println!("League: {}", league.name);
    println!("Event ID: {}", league.event_id);
    if !league.url.is_empty() {
        println!("Source: {}", league.url);
    }
    println!("Last Updated: {} UTC", league.last_updated.format("%Y-%m-%d %H:%M:%S"));
    println!("Players: {}", league.players.len());
    println!();
    println!("Registered Players:");

    let mut players: Vec<&Player> = league.players.iter().collect();
    players.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    for player in players {
        println!("  - {}", format_player(player));
    }
}

/// Writes the ledger grouped by period, in configured period order
pub fn write_history<W: Write>(
    out: &mut W,
    history: &MatchHistory,
    league: &League,
    config: &LeagueConfig,
) -> io::Result<()> {
    writeln!(out, "Match History: {}", league.name)?;
    writeln!(out, "Total Recorded Pairings: {}", history.pairings.len())?;

    let mut periods = history.periods();
    config.sort_periods(&mut periods);

    for period in periods {
        writeln!(out)?;
        writeln!(out, "{}:", period)?;
        for pairing in history.pairings_in(period) {
            writeln!(
                out,
                "  - {} vs {}",
                league.display_name_of(&pairing.player1_id),
                league.display_name_of(&pairing.player2_id)
            )?;
        }
    }
    Ok(())
}

/// Writes one player's previous opponents with repeat counts
pub fn write_player_history<W: Write>(
    out: &mut W,
    history: &MatchHistory,
    league: &League,
    player_id: &str,
) -> io::Result<()> {
    writeln!(out, "History for {}:", league.display_name_of(player_id))?;

    let opponents = history.previous_opponents(player_id);
    if opponents.is_empty() {
        writeln!(out, "  No matches recorded.")?;
        return Ok(());
    }

    writeln!(out, "  Previous Opponents ({}):", opponents.len())?;
    for opponent in &opponents {
        let times = history.times_played(player_id, opponent);
        let repeat = if times > 1 { format!(" (x{})", times) } else { String::new() };
        writeln!(out, "    - {}{}", league.display_name_of(opponent), repeat)?;
    }
    Ok(())
}
