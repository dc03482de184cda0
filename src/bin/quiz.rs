use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mcq_session::config::{parse_timeout_secs, GeneratorConfig};
use mcq_session::generators::{GenerateResponse, GeneratorKind, HttpGenerator, QuestionGenerator};
use mcq_session::interceptors::FileInterceptor;
use mcq_session::{QuestionSetFetcher, SessionController};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Take a generated multiple-choice quiz in the terminal", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    MCQ_GENERATOR_URL           Generator endpoint (default: https://mcqs-generator.vercel.app/generate)
    MCQ_GENERATOR_TIMEOUT_SECS  Request timeout in seconds (default: 30)
    RUST_LOG                    Log filter, e.g. mcq_session=debug

EXAMPLES:
    quiz --topic \"rust ownership\"
    quiz --generator mock
    quiz --record-dir ./generations")]
struct Args {
    /// Topic for the first quiz; prompted for when omitted
    #[arg(short, long)]
    topic: Option<String>,

    /// Question source: http, mock
    #[arg(short, long, default_value = "http", value_parser = GeneratorKind::from_str)]
    generator: GeneratorKind,

    /// Override the generator endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the request timeout in seconds (at least 1)
    #[arg(long, value_parser = parse_timeout_secs)]
    timeout_secs: Option<Duration>,

    /// Save every raw generator response into this directory
    #[arg(long)]
    record_dir: Option<PathBuf>,

    /// Print the JSON schema the generator must answer with and exit
    #[arg(long)]
    print_schema: bool,
}

fn read_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn build_generator(args: &Args, config: &GeneratorConfig) -> Box<dyn QuestionGenerator> {
    match (args.generator, &args.record_dir) {
        (GeneratorKind::Http, Some(dir)) => Box::new(
            HttpGenerator::new(config.clone()).with_interceptor(Arc::new(FileInterceptor::new(dir.clone()))),
        ),
        (kind, _) => kind.build(config),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();

    if args.print_schema {
        println!("{}", GenerateResponse::json_schema());
        return Ok(());
    }

    let mut config = GeneratorConfig::from_env().context("invalid generator configuration")?;
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.timeout = timeout;
    }

    let fetcher = QuestionSetFetcher::new(build_generator(&args, &config)).with_timeout(config.timeout);
    let mut session = SessionController::new(fetcher);
    let mut next_topic = args.topic.clone();

    loop {
        let topic = match next_topic.take() {
            Some(topic) => topic,
            None => match read_line("Enter quiz topic: ")? {
                Some(topic) => topic,
                None => return Ok(()),
            },
        };

        println!("Generating questions for '{}'...", topic.trim());
        if let Err(e) = session.load_topic(&topic).await {
            println!("{}", e);
            continue;
        }

        let questions = match session.questions() {
            Some(questions) => questions.clone(),
            None => continue,
        };

        for question in &questions {
            println!();
            println!("{}. {}", question.id + 1, question.prompt);
            for (key, text) in &question.options {
                println!("   {}. {}", key, text);
            }
            loop {
                let Some(key) = read_line("Your answer: ")? else {
                    return Ok(());
                };
                match session.select_answer(question.id, &key) {
                    Ok(_) => break,
                    Err(e) => println!("{}", e),
                }
            }
        }

        let summary = session.submit().context("submitting answers")?;

        println!();
        println!("Results:");
        for question in &questions {
            let mark = if summary.is_correct(question.id) == Some(true) { "correct" } else { "wrong" };
            println!(
                "  {}. {} (answer: {})",
                question.id + 1,
                mark,
                question.correct_key().unwrap_or("-")
            );
        }
        println!("Total Questions: {}", summary.total);
        println!("Correct Answers: {}", summary.correct);
        println!("Marks: {}", summary.marks());

        match read_line("Start a new quiz? [y/N]: ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => session.reset(),
            _ => return Ok(()),
        }
    }
}
