use std::io::Write;
use std::sync::Arc;

use news_core::{
    catalog, spawn_connectivity_monitor, ClientConfig, Connectivity, FetchMode, HttpNewsClient,
    InfiniteScroll, MonitorConfig, NewsApi, NewsController, NewsFilters, ResultsView,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cli::{Args, Command, Line};
use crate::render;

pub struct App {
    controller: NewsController,
    api: Arc<dyn NewsApi>,
    filters: Option<NewsFilters>,
    scroll: InfiniteScroll,
    page_size: usize,
    /// Number of accumulated articles already printed.
    viewed: usize,
    connectivity: watch::Receiver<Connectivity>,
}

pub async fn run(config: ClientConfig, args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpNewsClient::new(&config)?;
    info!(base_url = %client.base_url(), "using news backend");
    let api: Arc<dyn NewsApi> = Arc::new(client);

    let monitor = spawn_connectivity_monitor(
        api.clone(),
        MonitorConfig {
            interval: config.health_check_interval(),
        },
    );

    let controller =
        NewsController::new(api.clone()).with_max_retained(config.max_retained_results);
    let page_size = args.page_size.max(1);
    let mut app = App {
        controller,
        api,
        filters: None,
        scroll: InfiniteScroll::new(page_size),
        page_size,
        viewed: 0,
        connectivity: monitor.subscribe(),
    };

    match args.initial_filters() {
        Ok(filters) => app.search(filters).await,
        Err(e) => println!("{e}"),
    }
    app.repl().await?;

    if let Err(e) = monitor.stop().await {
        warn!(error = %e, "connectivity monitor did not stop cleanly");
    }
    Ok(())
}

impl App {
    async fn repl(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut watching = true;
        println!("Type `help` for commands.");
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                changed = self.connectivity.changed(), if watching => {
                    match changed {
                        Ok(()) => {
                            let status = *self.connectivity.borrow_and_update();
                            if let Some(notice) = render::connectivity_notice(status) {
                                println!("\n{notice}");
                            }
                        }
                        // monitor gone; keep reading commands
                        Err(_) => watching = false,
                    }
                    continue;
                }
            };
            let Some(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match Line::parse_line(&line) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    // clap renders help and usage errors itself
                    let _ = e.print();
                    continue;
                }
            };
            if !self.dispatch(command).await {
                break;
            }
        }
        Ok(())
    }

    /// Returns false when the reader asked to leave.
    async fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Search { terms, filters } => match filters.to_filters(&terms) {
                Ok(filters) => self.search(filters).await,
                Err(e) => println!("{e}"),
            },
            Command::More => self.more().await,
            Command::Show => self.show(),
            Command::Open { index } => self.open(index),
            Command::Clear => {
                self.controller.clear_news();
                self.filters = None;
                self.viewed = 0;
                println!("Cleared.");
            }
            Command::Health => self.health().await,
            Command::Filters => print_catalog(),
            Command::Quit => return false,
        }
        true
    }

    async fn search(&mut self, filters: NewsFilters) {
        let offline = self.connectivity.borrow().is_offline();
        if offline {
            if let Some(notice) = render::connectivity_notice(Connectivity::Offline) {
                println!("{notice}");
            }
        }
        println!("Searching for news...");
        self.controller.clear_news();
        self.viewed = 0;
        self.filters = Some(filters.clone());
        self.controller.fetch_news(&filters, FetchMode::Replace).await;
        self.print_status();
        self.print_next();
    }

    async fn more(&mut self) {
        let state = self.controller.snapshot();
        let wants_page = self.scroll.should_load_more(
            self.viewed + self.page_size,
            state.news.len(),
            state.has_next_page(),
            state.loading,
        );
        if wants_page {
            if let Some(filters) = self.filters.clone() {
                println!("Loading more articles...");
                self.controller.load_more(&filters).await;
                if let Some(error) = self.controller.snapshot().error {
                    println!("Error: {error}");
                }
            }
        }
        self.print_next();
    }

    fn show(&self) {
        let state = self.controller.snapshot();
        self.print_status();
        for (i, item) in state.news.iter().take(self.viewed).enumerate() {
            println!("{}\n", render::card(i + 1, item));
        }
    }

    fn open(&self, index: usize) {
        let state = self.controller.snapshot();
        let Some(item) = index.checked_sub(1).and_then(|i| state.news.get(i)) else {
            println!("No article #{index}.");
            return;
        };
        if item.link.is_empty() {
            println!("Article #{index} has no link.");
            return;
        }
        if let Err(e) = webbrowser::open(&item.link) {
            warn!(error = %e, url = %item.link, "failed to open browser");
            println!("Could not open a browser; the link is {}", item.link);
        }
    }

    async fn health(&self) {
        match self.api.check_health().await {
            Ok(health) => {
                let detail = health.message.unwrap_or(health.status);
                println!("Backend healthy: {detail}");
            }
            Err(e) => println!("Backend unreachable: {e}"),
        }
    }

    fn print_status(&self) {
        let state = self.controller.snapshot();
        if let Some(error) = &state.error {
            println!("Error: {error}");
        }
        if let Some(header) = render::results_header(&state, self.filters.as_ref()) {
            println!("{header}");
        }
        match state.view() {
            ResultsView::Empty => {
                println!("Try adjusting your search terms or filters to find more relevant articles.")
            }
            ResultsView::NotSearched => println!("Nothing searched yet."),
            _ => {}
        }
    }

    /// Prints the next screenful of already-loaded articles.
    fn print_next(&mut self) {
        let state = self.controller.snapshot();
        // the retained window may have dropped items since the last print
        let start = self.viewed.min(state.news.len());
        let end = (start + self.page_size).min(state.news.len());
        for (i, item) in state.news[start..end].iter().enumerate() {
            println!("{}\n", render::card(start + i + 1, item));
        }
        self.viewed = end;

        if state.has_searched && !state.news.is_empty() && self.viewed == state.news.len() {
            if state.has_next_page() {
                println!("Type `more` for more articles.");
            } else {
                println!("You've reached the end of the results.");
            }
        }
    }
}

fn print_catalog() {
    println!("Languages:");
    for choice in catalog::LANGUAGES {
        println!("  {:<4} {}", choice.code, choice.name);
    }
    println!("Countries:");
    for choice in catalog::COUNTRIES {
        println!("  {:<4} {}", choice.code, choice.name);
    }
    println!("Categories: {}", catalog::CATEGORIES.join(", "));
}
