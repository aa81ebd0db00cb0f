// src/report.rs
use crate::models::game::{Army, Game};
use crate::models::snapshot::SnapshotError;

pub const LINE_WIDTH: usize = 80;

/// A rendered battle report: the header block that is always printed,
/// and the body block that only goes into the report file.
#[derive(Debug)]
pub struct Report {
    pub header: Vec<String>,
    pub body: Vec<String>,
}

pub fn render(game: &Game) -> Result<Report, SnapshotError> {
    Ok(Report {
        header: header_lines(game)?,
        body: body_lines(game)?,
    })
}

fn header_lines(game: &Game) -> Result<Vec<String>, SnapshotError> {
    let army_1 = game.army_1()?;
    let army_2 = game.army_2()?;
    let faction_1 = army_1.faction()?;
    let faction_2 = army_2.faction()?;
    let lobby = game.lobby()?;

    let mut header = Vec::new();
    header.push("=".repeat(LINE_WIDTH));
    header.push(format!(
        "{:<32}{:<30}{:>18}",
        game.map(),
        game.mode(),
        game.elapsed_time()
    ));
    header.push("-".repeat(LINE_WIDTH));
    header.push(center(&format!(
        "Army 1 ({}) vs. Army 2 ({})",
        faction_1, faction_2
    )));
    header.push(center(&format!(
        "{} - {} vs. {} - {}",
        faction_1,
        army_1.tickets(),
        faction_2,
        army_2.tickets()
    )));
    header.push(center(&format!(
        "{} - {} vs. {} - {}",
        faction_1,
        army_1.score()?,
        faction_2,
        army_2.score()?
    )));
    header.push("-".repeat(LINE_WIDTH));
    header.push(format!("Soldiers Waiting: {}", game.waiting_count()));
    header.push(format!("Soldiers Joining: {}", lobby.len()));
    if !lobby.is_empty() {
        header.push("-".repeat(LINE_WIDTH));
        header.push("Joining:".to_string());
        for soldier in &lobby {
            header.push(format!("\t{}", soldier.display_name()?));
        }
    }
    header.push("-".repeat(LINE_WIDTH));
    header.push(format!(
        "{:>20}{:>40}{:<20}",
        format!("Army 1 Players: {}", army_1.soldiers().len()),
        "",
        format!("Army 2 Players: {}", army_2.soldiers().len())
    ));
    Ok(header)
}

fn body_lines(game: &Game) -> Result<Vec<String>, SnapshotError> {
    let army_1 = game.army_1()?;
    let army_2 = game.army_2()?;

    let mut body = Vec::new();
    body.push("-".repeat(LINE_WIDTH));
    body.push(format!(" Army 1 Commander: {}", army_1.commander()?));
    body.push(format!(" Army 2 Commander: {}", army_2.commander()?));
    body.push("-".repeat(LINE_WIDTH));
    body.push(center("Army 1 Attendance:"));
    attendance_lines(&army_1, &mut body)?;
    body.push("-".repeat(LINE_WIDTH));
    body.push(center("Army 2 Attendance:"));
    attendance_lines(&army_2, &mut body)?;
    body.push("=".repeat(LINE_WIDTH));
    Ok(body)
}

/// Attendance by clan tag: groups ordered by lowercased tag with the
/// untagged group (labelled "none") first, names lowercase-sorted
/// within each group. The exact tag string stays the group key.
fn attendance_lines(army: &Army, body: &mut Vec<String>) -> Result<(), SnapshotError> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for soldier in army.soldiers() {
        let tag = soldier.tag()?.to_string();
        let name = soldier.name()?.to_string();
        match groups.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, names)) => names.push(name),
            None => groups.push((tag, vec![name])),
        }
    }
    groups.sort_by_key(|(tag, _)| tag.to_lowercase());

    for (tag, mut names) in groups {
        if tag.is_empty() {
            body.push("[none]".to_string());
        } else {
            body.push(format!("[{}]", tag));
        }
        names.sort_by_key(|name| name.to_lowercase());
        for name in names {
            body.push(format!("\t{}", name));
        }
    }
    Ok(())
}

fn center(message: &str) -> String {
    let pad = (LINE_WIDTH / 2).saturating_sub(message.len() / 2);
    format!("{}{}", " ".repeat(pad), message)
}
