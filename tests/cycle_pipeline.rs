//! Escenarios de ciclo completo: motor guionizado + sink en memoria.
use std::sync::Arc;
use std::time::Duration;

use boardflow_rust::automation::implementations::{MockEngine, TargetScript};
use boardflow_rust::automation::UiEngine;
use boardflow_rust::config::{AppConfig, DriverConfig, ScheduleConfig, SinkConfig, StepTuning};
use boardflow_rust::data::{PageLocators, Target, TargetResult, ViewSelect};
use boardflow_rust::pipeline::{cycle, scheduler};
use boardflow_rust::sink::implementations::{MemorySink, SinkWrite};
use boardflow_rust::sink::SinkWriter;

fn locators() -> PageLocators {
    PageLocators { username: "//login/user".into(),
                   password: "//login/pass".into(),
                   submit: "//login/go".into(),
                   field_a: "//data/a".into(),
                   field_b: "//data/b".into() }
}

fn target(key: &str, view_select: Option<ViewSelect>) -> Target {
    Target { key: key.into(),
             username: "user".into(),
             secret: "secret".into(),
             entry_point: key.into(),
             view_select,
             locators: locators() }
}

fn fast_tuning() -> StepTuning {
    StepTuning { presence_timeout: Duration::from_millis(50),
                 extract_timeout: Duration::from_millis(50),
                 post_login_settle: Duration::ZERO,
                 post_select_settle: Duration::ZERO }
}

fn test_config(workers: usize) -> AppConfig {
    AppConfig { schedule: ScheduleConfig { period: Duration::from_secs(60),
                                           workers },
                driver: DriverConfig { server_url: "http://localhost:9515".into() },
                sink: SinkConfig { service_account_json: String::new(),
                                   spreadsheet_id: "sheet".into(),
                                   worksheet: "Panel".into(),
                                   data_anchor: "B2".into(),
                                   stamp_anchor: "D1".into() },
                tuning: fast_tuning() }
}

#[tokio::test]
async fn single_target_success_writes_block_then_stamp() {
    let roster = vec![target("https://a.example", None)];
    let engine: Arc<MockEngine> =
        Arc::new(MockEngine::new().with_script("https://a.example",
                                               TargetScript::values("1,234", "56")));
    let sink = Arc::new(MemorySink::new());

    scheduler::run_once(&(Arc::clone(&engine) as Arc<dyn UiEngine>),
                        &(Arc::clone(&sink) as Arc<dyn SinkWriter>),
                        &roster,
                        &test_config(4)).await;

    let writes = sink.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0],
               SinkWrite::Block(vec![vec!["1,234".into(), "56".into()]]));
    match &writes[1] {
        SinkWrite::Stamp(stamp) => {
            // Formato %Y-%m-%d %H:%M:%S.
            assert_eq!(stamp.len(), 19);
            assert_eq!(&stamp[4..5], "-");
            assert_eq!(&stamp[10..11], " ");
        }
        other => panic!("se esperaba la marca de tiempo, llegó {other:?}"),
    }
}

#[tokio::test]
async fn password_never_present_yields_sentinel_without_submit() {
    let roster = vec![target("https://a.example", None)];
    let mut script = TargetScript::values("1,234", "56");
    script.absent.push("//login/pass".into());
    let engine = Arc::new(MockEngine::new().with_script("https://a.example", script));

    let set = cycle::run_cycle(Arc::clone(&engine) as Arc<dyn UiEngine>,
                               &roster,
                               &fast_tuning(),
                               4).await;

    assert_eq!(set.results(),
               &[TargetResult::sentinel("https://a.example", "Password Error")]);

    // Tras el fallo de contraseña no se intenta la pulsación de acceso.
    let submit_clicks: Vec<_> = engine.log()
                                      .into_iter()
                                      .filter(|(_, action, locator)| {
                                          action == "click" && locator == "//login/go"
                                      })
                                      .collect();
    assert!(submit_clicks.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unmodeled_fault_keeps_roster_order() {
    // El primero tarda más que el segundo: el orden de finalización queda
    // invertido respecto al roster.
    let roster = vec![target("https://a.example", None), target("https://b.example", None)];
    let mut slow_ok = TargetScript::values("1,234", "56");
    slow_ok.step_delay = Duration::from_millis(60);
    let mut faulty = TargetScript::values("9", "9");
    faulty.panic_on_read = true;
    let engine = Arc::new(MockEngine::new().with_script("https://a.example", slow_ok)
                                           .with_script("https://b.example", faulty));
    let sink = Arc::new(MemorySink::new());

    scheduler::run_once(&(Arc::clone(&engine) as Arc<dyn UiEngine>),
                        &(Arc::clone(&sink) as Arc<dyn SinkWriter>),
                        &roster,
                        &test_config(2)).await;

    assert_eq!(sink.writes()[0],
               SinkWrite::Block(vec![vec!["1,234".into(), "56".into()],
                                     vec!["Exception".into(), "Exception".into()]]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cycles_are_idempotent_over_unchanged_state() {
    let roster: Vec<Target> = (0..5).map(|i| {
                                        let key = format!("https://t{i}.example");
                                        target(&key, None)
                                    })
                                    .collect();
    let mut engine = MockEngine::new();
    for (i, t) in roster.iter().enumerate() {
        engine = engine.with_script(&t.key, TargetScript::values(&format!("a{i}"), &format!("b{i}")));
    }
    let engine: Arc<dyn UiEngine> = Arc::new(engine);

    let first = cycle::run_cycle(Arc::clone(&engine), &roster, &fast_tuning(), 2).await;
    let second = cycle::run_cycle(Arc::clone(&engine), &roster, &fast_tuning(), 2).await;
    assert_eq!(first.rows(), second.rows());
}

#[tokio::test]
async fn sink_failure_is_recovered_at_cycle_level() {
    let roster = vec![target("https://a.example", None)];
    let engine: Arc<dyn UiEngine> =
        Arc::new(MockEngine::new().with_script("https://a.example",
                                               TargetScript::values("1", "2")));
    let sink = Arc::new(MemorySink::failing());

    // No debe entrar en pánico ni propagar el fallo del sink.
    scheduler::run_once(&engine,
                        &(Arc::clone(&sink) as Arc<dyn SinkWriter>),
                        &roster,
                        &test_config(4)).await;
    assert!(sink.writes().is_empty());
}

#[tokio::test]
async fn view_select_target_clicks_its_own_option() {
    let view = ViewSelect { option_locator: "//view/select/option[{index}]".into(),
                            option_index: 3 };
    let roster = vec![target("https://a.example", Some(view))];
    let engine = Arc::new(MockEngine::new().with_script("https://a.example",
                                                        TargetScript::values("7", "8")));

    let set = cycle::run_cycle(Arc::clone(&engine) as Arc<dyn UiEngine>,
                               &roster,
                               &fast_tuning(),
                               1).await;

    assert_eq!(set.results()[0], TargetResult::new("https://a.example", "7", "8"));
    let option_clicks: Vec<_> = engine.log()
                                      .into_iter()
                                      .filter(|(_, action, locator)| {
                                          action == "click"
                                          && locator == "//view/select/option[3]"
                                      })
                                      .collect();
    assert_eq!(option_clicks.len(), 1);
}
