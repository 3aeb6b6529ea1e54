//! Interactive chat with the VN100 financial assistant
//!
//! # Usage
//!
//! ```bash
//! # Database and API keys are read from the environment or a .env file
//! export MYSQL_DB="vn100"
//! export TOOL_CALLING_MODEL="gpt-4o"
//! export OPENAI_API_KEY="sk-..."
//!
//! cargo run --bin vnfin-chat
//! cargo run --bin vnfin-chat -- --question "So sánh ROE của VCB và BID"
//! ```

mod console;

use clap::Parser;
use console::ConsoleListener;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info};
use vnfin_agent::config::DEFAULT_MODEL;
use vnfin_agent::{AgentConfig, ToolsCallingAgent};
use vnfin_market::{MarketConfig, build_agent};
use vnfin_utils::{LogFormat, env, init_tracing_with, load_dotenv};

#[derive(Parser, Debug)]
#[command(name = "vnfin-chat")]
#[command(about = "Chat with a financial assistant for VN100 stocks", long_about = None)]
struct Args {
    /// Model to use; falls back to TOOL_CALLING_MODEL
    #[arg(short, long)]
    model: Option<String>,

    /// Ask one question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Maximum model calls per question
    #[arg(long, default_value_t = 10)]
    max_iterations: usize,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

enum Command {
    Quit,
    Reset,
    Ask,
}

fn parse_command(input: &str) -> Command {
    match input.to_lowercase().as_str() {
        "quit" | "exit" => Command::Quit,
        "reset" => Command::Reset,
        _ => Command::Ask,
    }
}

fn print_banner() {
    println!("\n{}", "=".repeat(50));
    println!("🤖 Welcome to the Interactive Chat!");
    println!("💡 Type 'quit' or 'exit' to end the chat");
    println!("🔄 Type 'reset' to start a new conversation");
    println!("{}\n", "=".repeat(50));
}

async fn ask(agent: &mut ToolsCallingAgent, question: &str) {
    println!("⚙️ Processing...");
    match agent.process_user_message(question).await {
        Ok(answer) => {
            println!("\n🤖 Assistant:");
            println!("{answer}\n");
            debug!(usage = ?agent.usage(), "Token usage so far");
        }
        Err(e) => eprintln!("\n❌ Error: {e}\n"),
    }
}

async fn run_interactive(agent: &mut ToolsCallingAgent) -> anyhow::Result<()> {
    print_banner();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        println!("👤 User:");
        print!("➜ ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!("\n👋 Goodbye! Have a great day!\n");
            break;
        }
        println!();

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_command(input) {
            Command::Quit => {
                println!("\n👋 Goodbye! Have a great day!\n");
                break;
            }
            Command::Reset => {
                agent.reset();
                println!("\n🔄 Conversation has been reset!\n");
            }
            Command::Ask => ask(agent, input).await,
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let args = Args::parse();

    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing_with("warn,vnfin_market=info", format);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "Loaded .env");
    }

    let model = args
        .model
        .or_else(|| env::var("TOOL_CALLING_MODEL"))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    info!(model = %model, "Starting vnfin-chat");

    let provider = vnfin_llm::create_provider(&model)?;
    let market_config = MarketConfig::from_env()?;
    let agent_config = AgentConfig {
        max_iterations: args.max_iterations,
        ..AgentConfig::for_model(&model)
    };

    let mut agent = build_agent(provider, &market_config, agent_config)?
        .with_listener(Arc::new(ConsoleListener));

    match args.question {
        Some(question) => {
            let answer = agent.process_user_message(&question).await?;
            println!("{answer}");
        }
        None => run_interactive(&mut agent).await?,
    }

    Ok(())
}
