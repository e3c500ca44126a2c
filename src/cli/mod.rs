use anyhow::Result;

use crate::config::Config;
use crate::data::Dataset;
use crate::screens::{
    format_answer, AnswerBlock, ListItem, MatchesScreen, PlayersScreen, PredictScreen,
    PredictionForm, TeamComparison,
};
use crate::services::{GuruClient, PredictionClient};
use crate::utils::{format_number, resolve_team_name};

pub async fn list_players(config: &Config, search: Option<&str>) -> Result<()> {
    let dataset = Dataset::load(config).await?;
    let mut screen = PlayersScreen::new(&dataset);
    if let Some(query) = search {
        screen.set_query(query);
    }

    let players = screen.visible();
    if players.is_empty() {
        println!("❌ No players found matching '{}'", screen.query());
        return Ok(());
    }

    println!("🏏 Players ({}):\n", players.len());
    for player in players {
        println!(
            "{:>3}. {:<24} {:<28} Total MVP: {}",
            player.rank,
            player.name,
            player.team,
            format_number(player.total_score)
        );
    }

    Ok(())
}

pub async fn list_matches(config: &Config) -> Result<()> {
    let dataset = Dataset::load(config).await?;
    let screen = MatchesScreen::new(&dataset);

    println!("🏆 Upcoming Matches\n");
    let mut index = 0usize;
    for item in screen.items() {
        match item {
            ListItem::Match(_) => {
                println!("  #{:<2} {}", index, item.to_line());
                index += 1;
            }
            ListItem::DateHeader { .. } => println!("\n{}", item.to_line()),
            _ => println!("{}", item.to_line()),
        }
    }

    println!("\n💡 Use 'ipl-insights fixture --index <n>' for head-to-head and top players");
    Ok(())
}

pub async fn show_fixture(config: &Config, index: usize) -> Result<()> {
    let dataset = Dataset::load(config).await?;
    let mut screen = MatchesScreen::new(&dataset);

    if let Err(e) = screen.select(index) {
        println!("❌ {}", e);
        return Ok(());
    }

    for item in screen.items() {
        match &item {
            // Buttons have no meaning in a terminal; point at the commands instead.
            ListItem::ActionButton { .. } => {}
            _ => println!("{}", item.to_line()),
        }
    }

    if let Some(fixture) = screen.selected() {
        println!(
            "\n💡 Full analysis: ipl-insights compare --team1 \"{}\" --team2 \"{}\"",
            fixture.team1, fixture.team2
        );
    }
    Ok(())
}

pub async fn compare_teams(config: &Config, team1: &str, team2: &str) -> Result<()> {
    let dataset = Dataset::load(config).await?;
    let known = dataset.team_names();

    let (Some(team1), Some(team2)) = (resolve_team_name(team1, &known), resolve_team_name(team2, &known)) else {
        println!("❌ Could not match both team names.");
        println!("\n💡 Available teams:");
        for team in &known {
            println!("   • {}", team);
        }
        return Ok(());
    };

    let comparison = TeamComparison::build(&dataset.players, &team1, &team2);

    for column in [&comparison.team1, &comparison.team2] {
        println!("📊 {}", column.team);
        println!("   {}", column.total_label);
        println!("   {}", column.average_label);
        println!("   {}\n", column.top_player_label);
    }

    println!("👥 All Players:");
    for player in &comparison.players {
        println!("{}", ListItem::player_row(player).to_line());
    }

    Ok(())
}

pub async fn list_teams(config: &Config) -> Result<()> {
    let client = PredictionClient::new(config.prediction_api_url.clone());
    match client.list_teams().await {
        Ok(teams) => {
            println!("🏏 Teams known to the prediction service:");
            for team in teams {
                println!("   • {}", team);
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch teams: {}", e);
            println!("❌ {}", e.user_message());
        }
    }
    Ok(())
}

pub async fn list_venues(config: &Config) -> Result<()> {
    let client = PredictionClient::new(config.prediction_api_url.clone());
    match client.list_venues().await {
        Ok(venues) => {
            println!("🏟️  Venues known to the prediction service:");
            for venue in venues {
                println!("   • {}", venue);
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch venues: {}", e);
            println!("❌ {}", e.user_message());
        }
    }
    Ok(())
}

pub async fn predict(config: &Config, mut form: PredictionForm) -> Result<()> {
    let client = PredictionClient::new(config.prediction_api_url.clone());
    let mut screen = PredictScreen::load(&client).await;

    // Let short names like "MI" through when the service gave us its list.
    for field in [&mut form.batting_team, &mut form.bowling_team] {
        if let Some(resolved) = resolve_team_name(field.as_str(), &screen.teams) {
            *field = resolved;
        }
    }
    screen.form = form;

    println!("🔮 Requesting prediction...");
    match screen.submit(&client).await {
        Ok(view) => {
            println!("\n🎯 Prediction Result");
            println!("   Batting Team: {}", view.batting_team);
            println!("   Bowling Team: {}", view.bowling_team);
            for line in &view.legend {
                println!("   {}", line);
            }
            println!(
                "   Impact: batting {:.2} | bowling {:.2}",
                view.batting_impact, view.bowling_impact
            );
        }
        Err(e) => {
            tracing::error!("Prediction failed: {}", e);
            println!("❌ {}", e.user_message());
            if e.is_retryable() {
                println!("💡 The service may be waking up; run the same command again.");
            }
        }
    }

    Ok(())
}

pub async fn ask(config: &Config, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        println!("❌ Please type a question.");
        return Ok(());
    }

    let guru = GuruClient::new(config.gemini_api_url.clone(), config.gemini_api_key.clone());
    if !guru.has_key() {
        tracing::warn!("GEMINI_API_KEY not set");
    }

    println!("🤔 Asking the IPL Guru...\n");
    let answer = guru.ask(question).await;

    for block in format_answer(&answer) {
        match block {
            AnswerBlock::Heading { text } => println!("\n▶ {}", text),
            AnswerBlock::Stat { key, value } => println!("   {}: {}", key, value),
            AnswerBlock::Text { text } => println!("{}", text),
        }
    }

    Ok(())
}
