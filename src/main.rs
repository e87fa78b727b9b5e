use std::io::{self, BufRead, Write};

use log::info;

use award_reporter::tba_api::{TbaApi, report};

/// Ask for the team number, only the line ending is stripped from the answer
fn prompt_team(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<String> {
    write!(output, "What team would you like to pick? ")?;
    output.flush()?;

    let mut team = String::new();
    input.read_line(&mut team)?;
    Ok(team.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    info!("Starting award-reporter...");

    let api = TbaApi::new()?;

    let team = prompt_team(&mut io::stdin().lock(), &mut io::stdout())?;
    let report = report::build_report(&api, &team, api.season()).await?;
    for line in report.lines() {
        println!("{line}");
    }
    info!("Reported {} events for team {team}", report.summaries.len());

    Ok(())
}
