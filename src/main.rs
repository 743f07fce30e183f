//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fieldhouse::{
    cli::{Commands, Fieldhouse, PlayerCmd, RecordCmd, TeamCmd},
    commands::{progress, record, roster, team},
    storage::AssessmentDatabase,
    Result,
};

/// Run the CLI.
fn main() -> Result<()> {
    let app = Fieldhouse::parse();
    let mut db = AssessmentDatabase::new()?;

    match app.command {
        Commands::Team { cmd } => match cmd {
            TeamCmd::Add { name, organization } => {
                roster::handle_team_add(&mut db, &name, organization.as_deref())?
            }
            TeamCmd::List { json } => roster::handle_team_list(&db, json)?,
            TeamCmd::Overview { name, json } => team::handle_team_overview(&db, &name, json)?,
            TeamCmd::Trends {
                name,
                assessment_type,
                start,
                end,
                json,
            } => team::handle_team_trends(&db, &name, assessment_type, start, end, json)?,
            TeamCmd::Rankings {
                name,
                assessment_type,
                json,
            } => team::handle_team_rankings(&db, &name, assessment_type, json)?,
        },

        Commands::Player { cmd } => match cmd {
            PlayerCmd::Add {
                name,
                team,
                throws,
                pitcher,
            } => roster::handle_player_add(&mut db, &name, team.as_deref(), throws, pitcher)?,
            PlayerCmd::List {
                team,
                include_inactive,
                json,
            } => roster::handle_player_list(&db, team.as_deref(), include_inactive, json)?,
        },

        Commands::Tests {
            assessment_type,
            json,
        } => record::handle_tests(assessment_type, json)?,

        Commands::Record { cmd } => match cmd {
            RecordCmd::Categorical {
                session,
                assessment_type,
                code,
                name,
                category,
                side,
                result,
            } => record::handle_record_categorical(
                &mut db,
                session.player_id,
                session.date,
                assessment_type,
                &code,
                name.as_deref(),
                category.as_deref(),
                side,
                &result,
            )?,
            RecordCmd::Sprint {
                session,
                code,
                runs,
            } => record::handle_record_sprint(&mut db, session.player_id, session.date, &code, &runs)?,
            RecordCmd::Power { session, results } => {
                record::handle_record_power(&mut db, session.player_id, session.date, &results)?
            }
            RecordCmd::Kams {
                session,
                test_type,
                measures,
            } => record::handle_record_kams(
                &mut db,
                session.player_id,
                session.date,
                &test_type,
                &measures,
            )?,
        },

        Commands::Complete { session_id, json } => {
            record::handle_complete(&mut db, session_id, json)?
        }

        Commands::Progress {
            player_id,
            assessment_type,
            start,
            end,
            json,
        } => progress::handle_progress(&db, player_id, assessment_type, start, end, json)?,

        Commands::Summary { player_id, json } => progress::handle_summary(&db, player_id, json)?,

        Commands::Compare {
            player_ids,
            assessment_type,
            as_of,
            json,
        } => progress::handle_compare(&db, &player_ids, assessment_type, as_of, json)?,
    }

    Ok(())
}
