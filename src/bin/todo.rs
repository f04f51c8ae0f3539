//! Terminal front-end for the todo API.

use anyhow::bail;
use clap::{Parser, Subcommand};
use todo_feed::client::{filter_todos_by_content, HttpTodoClient, Todo, TodoController};

#[derive(Parser)]
#[command(name = "todo", about = "What do today?")]
struct Cli {
    /// Base URL of the todo API
    #[arg(long, env = "TODO_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of todos, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only show todos whose content contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a todo
    Add { content: String },
    /// Mark a todo done, or not done again
    Toggle { id: String },
    /// Delete a todo
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_feed::init_tracing("warn");

    let cli = Cli::parse();
    let controller = TodoController::new(HttpTodoClient::new(cli.server));

    match cli.command {
        Command::List { page, search } => {
            let output = controller.get(page).await?;
            let todos = filter_todos_by_content(search.as_deref().unwrap_or(""), &output.todos);

            if todos.is_empty() {
                println!("Nothing to do here");
            }
            for todo in todos {
                print_todo(todo);
            }
            if output.pages > u64::from(page) {
                println!("-- page {} of {}, use --page {} for more", page, output.pages, page + 1);
            }
        }
        Command::Add { content } => {
            let mut failure = None;
            controller
                .create(&content, |todo| print_todo(&todo), |message| failure = Some(message))
                .await;
            if let Some(message) = failure {
                bail!(message);
            }
        }
        Command::Toggle { id } => {
            let mut failure = None;
            controller
                .toggle_done(&id, |message| failure = Some(message), || println!("toggled {}", id))
                .await;
            if let Some(message) = failure {
                bail!(message);
            }
        }
        Command::Delete { id } => {
            controller.delete_by_id(&id).await?;
            println!("deleted {}", id);
        }
    }

    Ok(())
}

fn print_todo(todo: &Todo) {
    let mark = if todo.done { "x" } else { " " };
    println!("[{}] {}  {}", mark, todo.content, todo.id);
}
