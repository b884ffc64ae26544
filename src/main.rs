use hr_dashboard_client::client::ApiClient;
use hr_dashboard_client::client::auth::services::login;
use hr_dashboard_client::client::kanban::models::Board;
use hr_dashboard_client::config::{Config, Session};
use hr_dashboard_client::logging;
use hr_dashboard_client::notify::LogNotifier;
use hr_dashboard_client::view::calendar::WeeklyCalendar;
use hr_dashboard_client::view::kanban::BoardPoller;
use hr_dashboard_client::view::week::CalendarEntry;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return;
        }
    };
    logging::init(&config.log_dir, config.log_level);
    tracing::info!("dashboard client started, api {}", config.api_base_url);

    let client = match authenticate(&config).await {
        Some(client) => client,
        None => return,
    };

    match config.department_id {
        Some(department_id) => print_week(&client, &config, department_id).await,
        None => tracing::warn!("DEPARTMENT_ID not set, skipping the weekly grid"),
    }

    watch_board(client, &config).await;
    tracing::info!("dashboard client stopped");
}

/// Token from the environment first, then a saved session, then a fresh login.
async fn authenticate(config: &Config) -> Option<ApiClient> {
    let client = ApiClient::from_config(config);
    if client.token().is_some() {
        return Some(client);
    }

    if let Some(path) = &config.session_path {
        match Session::load_optional(path) {
            Ok(Some(session)) => {
                tracing::info!("using saved session from {}", path.display());
                return Some(client.with_token(session.token));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("ignoring session file {}: {}", path.display(), e),
        }
    }

    let Some((username, password)) = config.credentials() else {
        tracing::error!("no API_TOKEN and no API_USERNAME/API_PASSWORD configured");
        return None;
    };

    match login(&client, username, password).await {
        Ok(client) => {
            if let (Some(path), Some(token)) = (&config.session_path, client.token()) {
                let session = Session::new(token, Some(username.to_string()));
                if let Err(e) = session.save_to_file(path) {
                    tracing::warn!("could not save session: {}", e);
                }
            }
            Some(client)
        }
        Err(e) => {
            tracing::error!("login failed: {}", e);
            None
        }
    }
}

async fn print_week(client: &ApiClient, config: &Config, department_id: i64) {
    let mut calendar = WeeklyCalendar::new(client.clone(), LogNotifier, department_id, config.today());
    if calendar.open().await.is_err() {
        return;
    }

    let week = calendar.week();
    println!("Week {} .. {} (department {})", week.start(), week.end(), department_id);
    for row in calendar.rows() {
        let cells: Vec<String> = row
            .days
            .iter()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| cell_label(entry))
                    .collect::<Vec<_>>()
                    .join("+")
            })
            .collect();
        println!("{:<24} | {}", row.person.full_name(), cells.join(" | "));
    }
}

fn cell_label(entry: &CalendarEntry) -> String {
    match entry {
        CalendarEntry::Shift(shift) => shift
            .shift_schedule
            .as_ref()
            .and_then(|schedule| schedule.name.clone())
            .unwrap_or_else(|| format!("shift#{}", shift.shift_schedule_id)),
        CalendarEntry::OffDay(_) => "OFF".to_string(),
        CalendarEntry::Leave(leave) => format!("LEAVE({})", leave.status),
    }
}

async fn watch_board(client: ApiClient, config: &Config) {
    let poller = BoardPoller::start(client, LogNotifier, config.kanban_poll_interval);
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(boards) = snapshot {
                    log_boards(&boards);
                }
            }
        }
    }

    poller.stop().await;
}

fn log_boards(boards: &[Board]) {
    for board in boards {
        let cards: usize = board.lists.iter().map(|list| list.cards.len()).sum();
        tracing::info!("board {}: {} lists, {} cards", board.name, board.lists.len(), cards);
    }
}
