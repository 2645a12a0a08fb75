// src/main.rs

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use frontend::{
    api::ApiClient,
    config::Config,
    controllers::{
        attempt::{AttemptView, Phase},
        community::CommunityPage,
        home,
        leaderboard::{LeaderboardPage, LeaderboardView},
        like::{LikeOutcome, LikeToggle},
        membership::{MembershipAction, MembershipOutcome},
        profile::ProfilePage,
        results::ResultsPage,
        search::{self, SearchKind, SearchQuery, SearchResults},
        take::{TakeQuizController, TakeView},
    },
    error::AppError,
    models::{SearchParams, user::LoginRequest},
    routes::{History, Route},
    services::{community, quiz},
    state::AppContext,
    utils::time::format_date,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the EcoQuiz platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and show who you are
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show your profile and stats
    Me,
    /// Recommended communities and trending quizzes
    Home,
    /// Search quizzes or communities
    Search {
        query: String,
        #[arg(long)]
        communities: bool,
        #[arg(long)]
        subject: Option<String>,
    },
    /// List communities
    Communities {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one community
    Community { id: String },
    /// Join a community
    Join { id: String },
    /// Leave a community
    Leave { id: String },
    /// List quizzes
    Quizzes {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one quiz
    Quiz { id: String },
    /// Toggle your like on a quiz
    Like { id: String },
    /// Take a quiz interactively
    Take { id: String },
    /// Review an attempt
    Results { attempt_id: String },
    /// Comment on a question of an attempt
    Comment {
        attempt_id: String,
        question_id: String,
        text: String,
    },
    /// Best attempts of a quiz
    Leaderboard { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "client.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let ctx = match AppContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to build the API client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match ctx.config.credentials.clone() {
        Some((email, password)) => {
            if let Err(e) = ctx.login(&LoginRequest { email, password }).await {
                tracing::warn!("Sign-in with configured credentials failed: {}", e);
                ctx.session.clear();
            }
        }
        None => ctx.bootstrap().await,
    }

    match run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message("Something went wrong"));
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), AppError> {
    let api = &ctx.api;
    match command {
        Command::Login { email, password } => {
            let profile = ctx.login(&LoginRequest { email, password }).await?;
            println!("Signed in as {} <{}>", profile.username, profile.email);
        }
        Command::Me => {
            let page = ProfilePage::load(api, &ctx.session).await?;
            let profile = page.profile();
            let stats = page.stats();
            println!("{} <{}>", profile.username, profile.email);
            println!(
                "{} attempts, {} communities, average {:.0}%, best {:.0}%",
                stats.attempts, stats.communities, stats.average_percentage, stats.best_percentage
            );
            for attempt in page.attempts() {
                println!(
                    "  {}  {}/{}  {:.0}%  {}",
                    attempt.quiz.title,
                    attempt.score,
                    attempt.quiz.questions_count,
                    attempt.percentage,
                    format_date(&attempt.completed_at)
                );
            }
        }
        Command::Home => {
            let view = home::load_home(api).await;
            println!("Recommended communities:");
            for c in &view.communities {
                println!("  {}  {}", c.id, c.name);
            }
            println!("Trending quizzes:");
            for q in &view.quizzes {
                println!("  {}  {} ({} min)", q.id, q.title, q.duration_minutes);
            }
            if let Some(message) = view.empty_message() {
                println!("{message}");
            }
        }
        Command::Search {
            query,
            communities,
            subject,
        } => {
            let query = SearchQuery {
                text: query,
                kind: if communities {
                    SearchKind::Communities
                } else {
                    SearchKind::Quizzes
                },
                subject,
            };
            match search::search(api, &query).await {
                SearchResults::Quizzes(quizzes) => {
                    for q in &quizzes {
                        println!("{}  {}", q.id, q.title);
                    }
                }
                SearchResults::Communities(communities) => {
                    for c in &communities {
                        println!("{}  {}", c.id, c.name);
                    }
                }
            }
        }
        Command::Communities { search } => {
            let params = SearchParams {
                search,
                ..Default::default()
            };
            for c in community::list_communities(api, &params).await? {
                println!("{}  {}  [{}]", c.id, c.name, c.member_role);
            }
        }
        Command::Community { id } => {
            let page = CommunityPage::load(api, &id).await?;
            let details = page.community();
            println!("{}  (created {})", details.name, page.created_on());
            println!("{}", details.description);
            println!("Your role: {}", page.role());
            println!("Quizzes:");
            for q in page.quizzes() {
                println!("  {}  {}", q.id, q.title);
            }
            println!("Members:");
            for m in page.members() {
                println!("  {}  {}", m.username, m.role);
            }
        }
        Command::Join { id } => change_membership(api, &id, MembershipAction::Join).await?,
        Command::Leave { id } => change_membership(api, &id, MembershipAction::Leave).await?,
        Command::Quizzes { search } => {
            let params = SearchParams {
                search,
                ..Default::default()
            };
            for q in quiz::list_quizzes(api, &params).await? {
                println!("{}  {}  ({} min, {} likes)", q.id, q.title, q.duration_minutes, q.likes_count);
            }
        }
        Command::Quiz { id } => {
            let detail = quiz::get_quiz(api, &id).await?;
            println!("{}", detail.title);
            println!("{}", detail.description);
            println!(
                "{} questions, {} min, {} likes{}",
                detail.number_of_questions,
                detail.duration_minutes,
                detail.likes_count,
                if detail.is_like { " (liked)" } else { "" }
            );
        }
        Command::Like { id } => {
            let detail = quiz::get_quiz(api, &id).await?;
            let toggle = LikeToggle::new(api.clone(), &id, detail.is_like, detail.likes_count);
            match toggle.toggle().await {
                LikeOutcome::Applied(state) | LikeOutcome::Unchanged(state) => println!(
                    "{} ({} likes)",
                    if state.liked { "Liked" } else { "Not liked" },
                    state.count
                ),
                LikeOutcome::Busy => {}
            }
        }
        Command::Take { id } => {
            if let Some(attempt_id) = take_quiz(ctx, &id).await? {
                print_results(ResultsPage::open(api.clone(), attempt_id).await);
            }
        }
        Command::Results { attempt_id } => {
            print_results(ResultsPage::open(api.clone(), attempt_id).await);
        }
        Command::Comment {
            attempt_id,
            question_id,
            text,
        } => {
            let mut page = ResultsPage::new(api.clone(), attempt_id);
            page.load().await?;
            page.add_comment(&question_id, &text).await?;
            println!("Comment posted");
        }
        Command::Leaderboard { id } => match LeaderboardPage::open(api, &id).await {
            LeaderboardView::NotFound => println!("Quiz not found"),
            LeaderboardView::Ready {
                title,
                rows,
                empty_message,
                ..
            } => {
                println!("{title}: leaderboard");
                for row in &rows {
                    println!(
                        "{:>3}. {:<20} {:>7} {:>5} {}",
                        row.rank, row.user.username, row.score, row.percentage, row.time
                    );
                }
                if let Some(message) = empty_message {
                    println!("{message}");
                }
            }
        },
    }
    Ok(())
}

async fn change_membership(
    api: &ApiClient,
    id: &str,
    wanted: MembershipAction,
) -> Result<(), AppError> {
    let page = CommunityPage::load(api, id).await?;
    match page.membership_action() {
        None => {
            println!("The creator cannot join or leave");
            return Ok(());
        }
        Some(action) if action != wanted => {
            println!("Nothing to do; you are {}", page.role());
            return Ok(());
        }
        Some(_) => {}
    }
    match page.toggle_membership().await {
        MembershipOutcome::Applied(role) => println!("Your role is now {role}"),
        MembershipOutcome::Unchanged(role) => println!("Nothing changed; you are {role}"),
        MembershipOutcome::NoAction | MembershipOutcome::Busy => {}
    }
    Ok(())
}

fn render_question(view: &AttemptView) {
    let Some(current) = &view.current else {
        println!("This quiz has no questions.");
        return;
    };
    println!();
    println!(
        "[{}] Question {} of {}  answered {}/{}",
        view.clock,
        current.index + 1,
        view.question_count,
        view.answered_count,
        view.question_count
    );
    println!("{}", current.question.question_text);
    for (i, option) in current.question.options.iter().enumerate() {
        let letter = option_label(i);
        let mark = if current.selected.as_deref() == Some(option.option_id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(" {mark} {letter}) {}", option.text);
    }
    println!("(a-d answer, n next, p previous, g <number> go to, s submit, q quit)");
}

/// `A`..`Z` for the first options, the 1-based number after that.
fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Runs an attempt on stdin. Returns the stored attempt id, if any.
async fn take_quiz(ctx: &AppContext, quiz_id: &str) -> Result<Option<String>, AppError> {
    let history = Arc::new(History::new());
    let controller =
        TakeQuizController::mount(quiz_id, Arc::new(ctx.api.clone()), history.clone()).await;

    let view = match controller.view() {
        TakeView::Ready(view) => view,
        TakeView::LoadFailed(message) => return Err(AppError::NotFound(message)),
        TakeView::Loading => return Ok(None),
    };
    println!("{} ({} questions)", view.title, view.question_count);
    render_question(&view);

    let mut updates = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut confirming = false;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                if let TakeView::Ready(view) = view {
                    if let Phase::Done(attempt_id) = view.phase {
                        println!("Submitted.");
                        return Ok(Some(attempt_id));
                    }
                    if view.remaining_seconds == 60 {
                        println!("One minute left!");
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let input = line.trim().to_ascii_lowercase();

                if confirming {
                    confirming = false;
                    if input == "y" {
                        match controller.submit().await {
                            Ok(Some(attempt_id)) => return Ok(Some(attempt_id)),
                            Ok(None) => {}
                            Err(e) => println!("{}", e.user_message("Failed to submit quiz")),
                        }
                    }
                    continue;
                }

                match input.as_str() {
                    "n" => { controller.go_to_next().await; }
                    "p" => { controller.go_to_previous().await; }
                    "q" => break,
                    "s" => {
                        if let Some(prompt) = controller.confirm_prompt().await {
                            println!("{prompt} [y/N]");
                            confirming = true;
                        }
                        continue;
                    }
                    letter @ ("a" | "b" | "c" | "d") => {
                        let current = match controller.view() {
                            TakeView::Ready(view) => view.current,
                            _ => None,
                        };
                        if let Some(current) = current {
                            let index = usize::from(letter.as_bytes()[0] - b'a');
                            if let Some(option) = current.question.options.get(index) {
                                // Rejected while a submission is in flight.
                                if let Err(e) = controller
                                    .select_answer(&current.question.question_id, &option.option_id)
                                    .await
                                {
                                    println!("{}", e.user_message("Could not record the answer"));
                                    continue;
                                }
                            }
                        }
                    }
                    other => {
                        if let Some(number) = other.strip_prefix("g ").and_then(|n| n.trim().parse::<usize>().ok()) {
                            controller.go_to_question(number.saturating_sub(1)).await;
                        }
                    }
                }

                if let TakeView::Ready(view) = controller.view() {
                    render_question(&view);
                }
            }
        }
    }

    controller.close();
    Ok(history.current().and_then(|route| match route {
        Route::Results(id) => Some(id),
        _ => None,
    }))
}

fn print_results(page: ResultsPage) {
    let Some(view) = page.view() else {
        println!("Results not available");
        return;
    };
    println!(
        "{}: {}/{} ({}%, grade {}) in {} min",
        view.quiz_title,
        view.score,
        view.total_questions,
        view.percentage,
        view.grade.as_str(),
        view.time_taken_minutes
    );
    if let Some(result) = page.result() {
        for (i, question) in result.questions.iter().enumerate() {
            let mark = if question.is_correct { "correct" } else { "wrong" };
            println!("{}. {} [{}]", i + 1, question.question_text, mark);
            for option in &question.options {
                println!("     {:<30} {:>5.1}%", option.text, option.percentage);
            }
            for comment in &question.comments {
                println!("     > {}: {}", comment.username, comment.comment_text);
            }
        }
    }
}
