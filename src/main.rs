use clap::{Arg, Command};
use color_eyre::Result;
use std::sync::Arc;

mod adapters;
mod application;
mod domain;
mod ports;

use adapters::{
    api::{ApiClient, RestGateway},
    config::FileConfigStore,
    tui::{run_tui, App},
};
use application::{AppError, Session, TodoController, TodoStore};
use domain::{validate_title, TodoDraft};
use ports::{AuthGateway, ConfigStore, TodoGateway};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Log to a file; the terminal belongs to the TUI.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("todo-tui.log")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let matches = Command::new("todo-tui")
        .version("0.1.0")
        .about("A terminal client for the todo service")
        .long_about(
            "A fast, keyboard-driven terminal client for managing todos.\n\n\
             Run without a subcommand for the interactive UI; login happens\n\
             in-app and the session is remembered between runs.",
        )
        .arg(
            Arg::new("server")
                .long("server")
                .value_name("URL")
                .help("Todo service base URL (can also be set via TODO_SERVER env var)")
                .global(true),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("TOKEN")
                .help("Session token (can also be set via TODO_TOKEN env var)")
                .global(true),
        )
        .subcommand(
            Command::new("todos")
                .about("Todo operations (JSON output, for scripting)")
                .subcommand(Command::new("list").about("List all todos"))
                .subcommand(
                    Command::new("search").about("Search todos on the server").arg(
                        Arg::new("query")
                            .help("Search query")
                            .required(true)
                            .index(1),
                    ),
                )
                .subcommand(
                    Command::new("add")
                        .about("Add a new todo")
                        .arg(Arg::new("title").help("Todo title").required(true).index(1))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_name("CATEGORY")
                                .help("Category for the new todo"),
                        ),
                ),
        )
        .get_matches();

    // Load configuration
    let config_store = Arc::new(FileConfigStore::new().map_err(AppError::from)?);
    let mut config = config_store.load_config().await.map_err(AppError::from)?;

    if let Some(server) = matches.get_one::<String>("server") {
        config.server_url = server.clone();
    }
    if let Some(token) = matches.get_one::<String>("token") {
        config.session_token = Some(token.clone());
    }

    config_store
        .save_config(&config)
        .await
        .map_err(AppError::from)?;

    // Create dependencies
    let api_client = Arc::new(ApiClient::new(
        config.server_url.clone(),
        config.session_token.clone(),
    ));
    let gateway = Arc::new(RestGateway::new(api_client));

    let todo_gateway: Arc<dyn TodoGateway> = gateway.clone();
    let auth_gateway: Arc<dyn AuthGateway> = gateway;

    let store = Arc::new(TodoStore::new(todo_gateway));
    let session = Arc::new(Session::new(auth_gateway, config_store));
    let controller = TodoController::new(store.clone(), config.default_category.clone());

    match matches.subcommand() {
        Some(("todos", todos_matches)) => {
            // Scripting mode needs an existing session.
            if session.restore().await?.is_none() {
                eprintln!("Not logged in. Run todo-tui without arguments and login first.");
                std::process::exit(1);
            }

            match todos_matches.subcommand() {
                Some(("list", _)) => match store.reload().await {
                    Ok(()) => {
                        let json = serde_json::to_string_pretty(&store.all().await)?;
                        println!("{json}");
                    }
                    Err(e) => {
                        eprintln!("Failed to list todos: {e}");
                        std::process::exit(1);
                    }
                },
                Some(("search", search_matches)) => {
                    if let Some(query) = search_matches.get_one::<String>("query") {
                        match store.search(query).await {
                            Ok(()) => {
                                let json = serde_json::to_string_pretty(&store.all().await)?;
                                println!("{json}");
                            }
                            Err(e) => {
                                eprintln!("Failed to search todos: {e}");
                                std::process::exit(1);
                            }
                        }
                    }
                }
                Some(("add", add_matches)) => {
                    if let Some(title) = add_matches.get_one::<String>("title") {
                        if let Err(e) = validate_title(title) {
                            eprintln!("{e}");
                            std::process::exit(1);
                        }

                        let category = add_matches
                            .get_one::<String>("category")
                            .cloned()
                            .unwrap_or_else(|| config.default_category.clone());

                        match store.create(&TodoDraft::new(title.clone(), category)).await {
                            Ok(todo) => {
                                let json = serde_json::to_string_pretty(&todo)?;
                                println!("{json}");
                            }
                            Err(e) => {
                                eprintln!("Failed to add todo: {e}");
                                std::process::exit(1);
                            }
                        }
                    }
                }
                _ => {
                    eprintln!("Unknown todos subcommand");
                    std::process::exit(1);
                }
            }
        }
        None => {
            // Default behavior: interactive TUI. A stored session skips the
            // login screen; any restore failure just lands there instead.
            let logged_in = match session.restore().await {
                Ok(user) => user.is_some(),
                Err(e) => {
                    tracing::warn!("Could not restore session: {e}");
                    false
                }
            };

            let app = App::new(session, controller, logged_in);

            if let Err(e) = run_tui(app).await {
                eprintln!("Application error: {e}");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command");
            std::process::exit(1);
        }
    }

    Ok(())
}
