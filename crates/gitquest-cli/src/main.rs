//! GitQuest CLI - interactive terminal for the Git tutorials
//!
//! Usage:
//!   gitquest                              # Run the default tutorial
//!   gitquest --tutorial github-portfolio  # Pick another tutorial
//!   gitquest --list                       # List available tutorials
//!   gitquest -c 'git init'               # Feed one command and exit

mod store;

use anyhow::{Context, Result};
use clap::Parser;
use gitquest::{
    get_explanation, ExplainRequest, HttpExplainer, LineKind, StepAdvance, Tutorial, TutorialId,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use store::FileProgressStore;

/// GitQuest - learn the Git workflow in a simulated terminal
#[derive(Parser, Debug)]
#[command(name = "gitquest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tutorial to run (see --list)
    #[arg(short, long, default_value = "git-basics")]
    tutorial: String,

    /// List available tutorials
    #[arg(long)]
    list: bool,

    /// Feed a single command and print its output
    #[arg(short = 'c')]
    command: Option<String>,

    /// Ignore saved progress
    #[arg(long)]
    fresh: bool,

    /// Explanation service endpoint for :explain
    #[arg(long, env = "GITQUEST_EXPLAINER_URL")]
    explainer_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for id in TutorialId::ALL {
            println!("{:<20} {}", id.slug(), id.name());
        }
        return Ok(());
    }

    let tutorial_id = TutorialId::from_slug(&args.tutorial)
        .with_context(|| format!("unknown tutorial '{}' (try --list)", args.tutorial))?;

    let mut builder = Tutorial::builder().tutorial(tutorial_id);
    if !args.fresh {
        builder = builder.progress_store(FileProgressStore::at_default_path()?);
    }
    let mut tutorial = builder.build();

    // One-shot mode: feed the command, print its output, exit.
    if let Some(command) = args.command {
        let advance = tutorial.input(&command);
        print_last_output(&tutorial);
        if let Some(advance) = advance {
            println!("Step complete: \"{}\"", advance.completed_title);
        }
        return Ok(());
    }

    run_repl(&mut tutorial, args.explainer_url).await
}

async fn run_repl(tutorial: &mut Tutorial, explainer_url: Option<String>) -> Result<()> {
    let explainer = explainer_url.map(HttpExplainer::new);

    println!("{}", tutorial.state().terminal[0].content);
    println!("{} - type :help for commands\n", tutorial.state().tutorial_id.name());
    if let Some(step) = tutorial.resume_hint() {
        println!("You previously reached step {step}. The workspace starts fresh.\n");
    }
    print_step(tutorial);

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("$ ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if let Some(meta) = line.strip_prefix(':') {
                    if handle_meta(tutorial, meta, explainer.as_ref()).await? {
                        break;
                    }
                    continue;
                }

                let advance = tutorial.input(&line);
                print_last_output(tutorial);
                if let Some(advance) = advance {
                    print_advance(tutorial, &advance);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Handle a `:`-prefixed meta command. Returns true to quit.
async fn handle_meta(
    tutorial: &mut Tutorial,
    input: &str,
    explainer: Option<&HttpExplainer>,
) -> Result<bool> {
    let (command, rest) = match input.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        "help" => {
            println!(":step             show the current step again");
            println!(":action           trigger the step's action button");
            println!(":explain <query>  ask the AI explainer");
            println!(":export [path]    save the workspace as a tar.gz archive");
            println!(":reset            restart the tutorial");
            println!(":quit             leave");
        }
        "step" => print_step(tutorial),
        "action" => match tutorial.current_step().ui_action.clone() {
            Some(ui) => {
                println!("{}", ui.label);
                if let Some(advance) = tutorial.trigger_ui_action() {
                    print_advance(tutorial, &advance);
                }
            }
            None => println!("This step has no action button."),
        },
        "explain" => {
            if rest.is_empty() {
                println!("usage: :explain <query>");
            } else {
                match explainer {
                    Some(explainer) => {
                        let request = ExplainRequest::new(rest)
                            .with_context(tutorial.current_step().title);
                        let outcome = get_explanation(explainer, request).await;
                        println!("{}", outcome.message);
                    }
                    None => println!(
                        "No explainer configured. Set GITQUEST_EXPLAINER_URL or pass --explainer-url."
                    ),
                }
            }
        }
        "export" => {
            let path = if rest.is_empty() { "workspace.tar.gz" } else { rest };
            let archive = gitquest::export::tar_gz(&tutorial.state().root)?;
            std::fs::write(path, archive)
                .with_context(|| format!("failed to write {path}"))?;
            println!("Workspace exported to {path}");
        }
        "reset" => {
            tutorial.reset();
            println!("{}\n", tutorial.state().terminal[0].content);
            print_step(tutorial);
        }
        "quit" | "q" | "exit" => return Ok(true),
        other => println!("Unknown meta command :{other} (try :help)"),
    }

    Ok(false)
}

fn print_last_output(tutorial: &Tutorial) {
    if let Some(line) = tutorial.state().terminal.last() {
        if line.kind == LineKind::Output && !line.content.is_empty() {
            println!("{}", line.content);
        }
    }
}

fn print_advance(tutorial: &Tutorial, advance: &StepAdvance) {
    println!("\nStep complete: \"{}\"\n", advance.completed_title);
    print_step(tutorial);
}

fn print_step(tutorial: &Tutorial) {
    let step = tutorial.current_step();
    let total = tutorial.steps().len();
    println!("== Step {}/{}: {} ==", step.id + 1, total, step.title);
    println!("{}", step.description);
    if step.ui_action.is_some() {
        println!("(this step has an action button: type :action)");
    }
    println!();
}
