//! Comportamiento del bucle planificador sobre reloj pausado.
use std::sync::Arc;
use std::time::Duration;

use boardflow_rust::automation::implementations::{MockEngine, TargetScript};
use boardflow_rust::automation::UiEngine;
use boardflow_rust::config::{AppConfig, DriverConfig, ScheduleConfig, SinkConfig, StepTuning};
use boardflow_rust::data::{PageLocators, Target};
use boardflow_rust::pipeline::scheduler;
use boardflow_rust::sink::implementations::{MemorySink, SinkWrite};
use boardflow_rust::sink::SinkWriter;

fn roster() -> Vec<Target> {
    vec![Target { key: "https://a.example".into(),
                  username: "user".into(),
                  secret: "secret".into(),
                  entry_point: "https://a.example".into(),
                  view_select: None,
                  locators: PageLocators { username: "//login/user".into(),
                                           password: "//login/pass".into(),
                                           submit: "//login/go".into(),
                                           field_a: "//data/a".into(),
                                           field_b: "//data/b".into() } }]
}

fn config() -> AppConfig {
    AppConfig { schedule: ScheduleConfig { period: Duration::from_secs(60),
                                           workers: 2 },
                driver: DriverConfig { server_url: "http://localhost:9515".into() },
                sink: SinkConfig { service_account_json: String::new(),
                                   spreadsheet_id: "sheet".into(),
                                   worksheet: "Panel".into(),
                                   data_anchor: "B2".into(),
                                   stamp_anchor: "D1".into() },
                tuning: StepTuning { presence_timeout: Duration::from_millis(50),
                                     extract_timeout: Duration::from_millis(50),
                                     post_login_settle: Duration::ZERO,
                                     post_select_settle: Duration::ZERO } }
}

fn blocks(writes: &[SinkWrite]) -> usize {
    writes.iter().filter(|w| matches!(w, SinkWrite::Block(_))).count()
}

#[tokio::test(start_paused = true)]
async fn first_cycle_runs_immediately() {
    let engine: Arc<dyn UiEngine> =
        Arc::new(MockEngine::new().with_script("https://a.example",
                                               TargetScript::values("1", "2")));
    let sink = Arc::new(MemorySink::new());

    let task = tokio::spawn(scheduler::run(engine,
                                           Arc::clone(&sink) as Arc<dyn SinkWriter>,
                                           roster(),
                                           config()));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(blocks(&sink.writes()), 1, "el primer ciclo corre al arrancar");
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn scheduler_repeats_on_the_fixed_period() {
    let engine: Arc<dyn UiEngine> =
        Arc::new(MockEngine::new().with_script("https://a.example",
                                               TargetScript::values("1", "2")));
    let sink = Arc::new(MemorySink::new());

    let task = tokio::spawn(scheduler::run(engine,
                                           Arc::clone(&sink) as Arc<dyn SinkWriter>,
                                           roster(),
                                           config()));

    tokio::time::sleep(Duration::from_secs(121)).await;
    let runs = blocks(&sink.writes());
    assert!(runs >= 3, "se esperaban al menos 3 ciclos en dos periodos, hubo {runs}");
    task.abort();
}
