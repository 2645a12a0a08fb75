// tests/flow_tests.rs

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{PASSWORD, spawn_app};
use frontend::{
    AppContext,
    config::Config,
    controllers::{
        attempt::Phase,
        community::CommunityPage,
        forms::QuizDraft,
        home::{self, EMPTY_MESSAGE},
        leaderboard::{LeaderboardPage, LeaderboardView},
        like::{LikeOutcome, LikeState, LikeToggle},
        membership::{MembershipAction, MembershipOutcome},
        results::{Grade, ResultsPage},
        take::{TakeQuizController, TakeView},
    },
    models::{community::MemberRole, user::LoginRequest},
    routes::{Access, History, Navigator, Route, guard},
};
use uuid::Uuid;

#[tokio::test]
async fn bootstrap_login_and_logout_drive_the_session() {
    let app = spawn_app().await;
    let ctx = AppContext::with_client(Config::for_base_url(app.base_url()), app.client());

    ctx.bootstrap().await;
    let snapshot = ctx.session.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.user.is_none());
    assert_eq!(
        guard(&Route::Home, &snapshot),
        Access::Redirect(Route::Landing)
    );

    let profile = ctx
        .login(&LoginRequest {
            email: "alice@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(profile.username, "alice");
    assert_eq!(guard(&Route::Home, &ctx.session.snapshot()), Access::Allow);
    assert_eq!(
        guard(&Route::Landing, &ctx.session.snapshot()),
        Access::Redirect(Route::Home)
    );

    ctx.logout().await.unwrap();
    assert!(ctx.session.current_user().is_none());
    assert_eq!(app.hits("POST /auth/logout"), 1);

    // The cookie was expired by the server.
    ctx.bootstrap().await;
    assert!(ctx.session.current_user().is_none());
}

#[tokio::test]
async fn like_toggle_follows_server_status() {
    let app = spawn_app().await;
    let toggle = LikeToggle::new(app.client(), "quiz-1", false, 3);

    let outcome = toggle.toggle().await;
    assert_eq!(outcome, LikeOutcome::Applied(LikeState { liked: true, count: 4 }));

    app.set_like_status("unliked");
    let outcome = toggle.toggle().await;
    assert_eq!(outcome, LikeOutcome::Applied(LikeState { liked: false, count: 3 }));

    app.set_like_status("pending");
    let outcome = toggle.toggle().await;
    assert_eq!(outcome, LikeOutcome::Unchanged(LikeState { liked: false, count: 3 }));

    app.set_like_status("error");
    let outcome = toggle.toggle().await;
    assert_eq!(outcome, LikeOutcome::Unchanged(LikeState { liked: false, count: 3 }));

    assert_eq!(app.hits("POST /quizzes/like"), 4);
    assert!(!toggle.is_pending());
}

#[tokio::test]
async fn like_toggle_ignores_clicks_while_pending() {
    let app = spawn_app().await;
    app.state.like_delay_ms.store(200, Ordering::SeqCst);
    let toggle = LikeToggle::new(app.client(), "quiz-1", false, 0);

    let (first, second) = tokio::join!(toggle.toggle(), toggle.toggle());

    assert_eq!(first, LikeOutcome::Applied(LikeState { liked: true, count: 1 }));
    assert_eq!(second, LikeOutcome::Busy);
    assert_eq!(app.hits("POST /quizzes/like"), 1);
}

#[tokio::test]
async fn community_membership_join_and_leave() {
    let app = spawn_app().await;
    let client = app.client();

    let page = CommunityPage::load(&client, "c-open").await.unwrap();
    assert_eq!(page.role(), MemberRole::NonMember);
    assert_eq!(page.membership_action(), Some(MembershipAction::Join));
    assert_eq!(page.members().len(), 2);
    assert_eq!(page.created_on(), "Jan 15, 2025");
    assert!(page.banner_url().ends_with("/api/uploads/banner.jpg"));

    assert_eq!(
        page.toggle_membership().await,
        MembershipOutcome::Applied(MemberRole::Member)
    );
    assert_eq!(page.membership_action(), Some(MembershipAction::Leave));

    assert_eq!(
        page.toggle_membership().await,
        MembershipOutcome::Applied(MemberRole::NonMember)
    );
    assert_eq!(app.hits("POST /communities/join"), 1);
    assert_eq!(app.hits("POST /communities/leave"), 1);
}

#[tokio::test]
async fn creator_has_no_membership_control() {
    let app = spawn_app().await;
    let page = CommunityPage::load(&app.client(), "c-creator").await.unwrap();

    assert_eq!(page.membership_action(), None);
    assert_eq!(page.toggle_membership().await, MembershipOutcome::NoAction);
    assert_eq!(app.hits("POST /communities/join"), 0);
    assert_eq!(app.hits("POST /communities/leave"), 0);
}

#[tokio::test]
async fn admin_leaves_like_a_member() {
    let app = spawn_app().await;
    let page = CommunityPage::load(&app.client(), "c-admin").await.unwrap();

    assert_eq!(page.membership_action(), Some(MembershipAction::Leave));
}

#[tokio::test]
async fn take_quiz_over_http_submits_and_opens_results() {
    let app = spawn_app().await;
    let history = Arc::new(History::new());
    let quiz_id = Uuid::new_v4().to_string();

    let controller =
        TakeQuizController::mount(quiz_id.clone(), Arc::new(app.client()), history.clone()).await;

    let TakeView::Ready(view) = controller.view() else {
        panic!("quiz did not load");
    };
    assert_eq!(view.quiz_id, quiz_id);
    assert_eq!(view.question_count, 3);
    assert_eq!(view.clock, "10:00");

    controller.select_answer("q1", "q1o2").await.unwrap();
    assert!(controller.go_to_next().await);
    controller.select_answer("q2", "q2o1").await.unwrap();

    assert_eq!(
        controller.confirm_prompt().await.as_deref(),
        Some("You have answered 2 of 3 questions. Are you sure you want to submit?")
    );

    let attempt_id = controller.submit().await.unwrap();
    assert_eq!(attempt_id.as_deref(), Some("attempt-1"));
    assert_eq!(history.current(), Some(Route::Results("attempt-1".to_string())));

    let TakeView::Ready(view) = controller.view() else {
        panic!("view lost after submit");
    };
    assert_eq!(view.phase, Phase::Done("attempt-1".to_string()));

    let submissions = app.state.submissions.lock().unwrap().clone();
    assert_eq!(submissions.len(), 1);
    let body = &submissions[0];
    // Submitted well inside the first minute.
    assert!(body["duration_minutes"].as_u64().unwrap() <= 1);
    assert_eq!(body["answers"][0]["question_id"], "q1");
    assert_eq!(body["answers"][0]["option_id"], "q1o2");
    assert_eq!(body["answers"][0]["answer_text"], "Answer 1.2");
    assert_eq!(body["answers"][1]["option_id"], "q2o1");

    // A second submit is refused and sends nothing.
    assert_eq!(controller.submit().await.unwrap(), None);
    assert_eq!(app.hits("POST /quizzes/submit"), 1);
}

#[tokio::test]
async fn missing_quiz_shows_load_failure() {
    let app = spawn_app().await;
    let history = Arc::new(History::new());

    let controller = TakeQuizController::mount("missing", Arc::new(app.client()), history.clone()).await;

    assert_eq!(controller.view(), TakeView::LoadFailed("Quiz not found".to_string()));
    assert_eq!(controller.submit().await.unwrap(), None);
    assert!(history.entries().is_empty());
    assert_eq!(app.hits("POST /quizzes/submit"), 0);
}

#[tokio::test]
async fn results_comment_is_posted_then_refetched() {
    let app = spawn_app().await;
    let mut page = ResultsPage::open(app.client(), "attempt-7").await;

    let view = page.view().unwrap();
    assert_eq!(view.progress_label, "Question 1 of 3");
    assert_eq!(view.percentage, 67);
    assert_eq!(view.grade, Grade::C);
    assert!(view.question.as_ref().unwrap().comments.is_empty());

    page.add_comment("q1", "  Nice question  ").await.unwrap();

    let question = page.view().unwrap().question.unwrap();
    assert_eq!(question.comments.len(), 1);
    assert_eq!(question.comments[0].comment_text, "Nice question");
    assert_eq!(app.hits("GET /quizzes/attempts/results"), 2);

    assert!(page.go_to_question(2));
    let view = page.view().unwrap();
    assert!(!view.question.unwrap().was_answered());
    assert_eq!(
        view.completion_message.as_deref(),
        Some("You've reviewed all questions. Your final score is 67%.")
    );
}

#[tokio::test]
async fn blank_comment_is_not_sent() {
    let app = spawn_app().await;
    let mut page = ResultsPage::open(app.client(), "attempt-7").await;

    assert!(page.add_comment("q1", "   ").await.is_err());
    assert!(page.add_comment("nope", "hello").await.is_err());
    assert_eq!(app.hits("POST /questions/comments"), 0);
}

#[tokio::test]
async fn leaderboard_builds_podium() {
    let app = spawn_app().await;

    let LeaderboardView::Ready { title, podium, rows, empty_message } =
        LeaderboardPage::open(&app.client(), "quiz-1").await
    else {
        panic!("leaderboard not found");
    };

    assert_eq!(title, "Recycling");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].score, "8/8");
    assert_eq!(rows[1].time, "4m 7s");
    let podium = podium.unwrap();
    assert_eq!(podium[0].user.username, "bob");
    assert_eq!(podium[1].user.username, "ann");
    assert_eq!(podium[2].user.username, "cy");
    assert!(empty_message.is_none());
    assert_eq!(*app.state.leaderboard_limit.lock().unwrap(), Some(50));
}

#[tokio::test]
async fn leaderboard_of_missing_quiz_is_not_found() {
    let app = spawn_app().await;

    assert_eq!(
        LeaderboardPage::open(&app.client(), "missing").await,
        LeaderboardView::NotFound
    );
}

#[tokio::test]
async fn home_degrades_failed_section_to_empty() {
    let app = spawn_app().await;
    app.state.fail_recommended.store(true, Ordering::SeqCst);

    let view = home::load_home(&app.client()).await;

    assert!(view.communities.is_empty());
    assert_eq!(view.quizzes.len(), 2);
    assert_eq!(view.empty_message(), None);
}

#[tokio::test]
async fn home_without_quizzes_shows_hint() {
    // Every request fails against a closed port.
    let client = frontend::ApiClient::builder(url::Url::parse("http://127.0.0.1:9/api").unwrap())
        .build()
        .unwrap();

    let view = home::load_home(&client).await;
    assert!(view.communities.is_empty());
    assert_eq!(view.empty_message(), Some(EMPTY_MESSAGE));
}

#[tokio::test]
async fn quiz_form_shows_server_error_inline() {
    let app = spawn_app().await;
    let history = History::new();

    let mut draft = QuizDraft::new("c-member");
    draft.title = "Composting".to_string();
    draft.set_question_text(0, "What goes in compost?").unwrap();
    for (i, text) in ["Peels", "Plastic", "Glass", "Metal"].iter().enumerate() {
        draft.set_option_text(0, i, *text).unwrap();
    }

    let err = draft.submit(&app.client(), &history as &dyn Navigator).await.unwrap_err();

    assert_eq!(err, "Community not found");
    assert_eq!(app.hits("POST /quizzes"), 1);
    assert!(history.entries().is_empty());
}
