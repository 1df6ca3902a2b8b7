//! Scheduler behavior tests.
//!
//! These live as an integration test (rather than an in-lib `#[cfg(test)]`
//! module) because they depend on `apura-test-utils`, which in turn depends
//! on `apura-scheduler`. An in-lib test build would compile a second,
//! distinct instance of this crate, so the scripted client's
//! `AggregationClient` impl would not match the trait seen by the test.
//! Building here links against the same lib instance as `apura-test-utils`.

use apura_model::{AnalysisConfiguration, Bucket, DataSource, FieldDescriptor, ValueType};
use apura_scheduler::{
    AggregationError, ExecutionScheduler, SchedulerConfig, SchedulerHandle,
};
use apura_test_utils::{sample_result, ScriptedAggregationClient, ScriptedResponse};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;


fn cbs() -> FieldDescriptor {
    FieldDescriptor::new("valor_cbs", "valorCBS", "Valor CBS", ValueType::Number)
}

fn month() -> FieldDescriptor {
    FieldDescriptor::new("mes", "mes", "Mês", ValueType::Date)
}

fn executable_config() -> AnalysisConfiguration {
    AnalysisConfiguration::new("t").add_field(cbs(), Bucket::Values)
}

fn spawn_with(
    client: Arc<ScriptedAggregationClient>,
    initial: AnalysisConfiguration,
) -> (watch::Sender<AnalysisConfiguration>, SchedulerHandle) {
    let (tx, rx) = watch::channel(initial);
    let handle = ExecutionScheduler::spawn(client, rx, SchedulerConfig::default());
    (tx, handle)
}

async fn settle() {
    // let spawned tasks observe the virtual clock
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn rapid_changes_coalesce_into_one_dispatch_with_the_final_configuration() {
    let client = Arc::new(ScriptedAggregationClient::always(sample_result(1)));
    let (tx, handle) = spawn_with(Arc::clone(&client), AnalysisConfiguration::new("t"));

    // four edits inside one debounce window
    let mut config = AnalysisConfiguration::new("t");
    for field in [cbs(), month()] {
        for bucket in [Bucket::Values, Bucket::Group] {
            config = config.add_field(field.clone(), bucket);
            tx.send_replace(config.clone());
            tokio::time::advance(Duration::from_millis(50)).await;
        }
    }

    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], config);

    drop(tx);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn gate_not_met_means_no_dispatch_and_no_result_change() {
    let client = Arc::new(ScriptedAggregationClient::always(sample_result(1)));
    // values assigned but simulation base never chosen: gate stays closed
    let config = executable_config().set_data_source(DataSource::simulacao());
    let (tx, handle) = spawn_with(Arc::clone(&client), config);

    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;

    assert!(client.calls().is_empty());
    assert!(handle.results().borrow().is_none());

    drop(tx);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn initial_executable_configuration_runs_without_an_edit() {
    let client = Arc::new(ScriptedAggregationClient::always(sample_result(3)));
    let (tx, handle) = spawn_with(Arc::clone(&client), executable_config());

    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;

    assert_eq!(client.calls().len(), 1);
    assert_eq!(handle.results().borrow().as_ref().unwrap().len(), 3);

    drop(tx);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn display_option_edits_do_not_restart_the_window() {
    let client = Arc::new(ScriptedAggregationClient::always(sample_result(1)));
    let config = executable_config();
    let (tx, handle) = spawn_with(Arc::clone(&client), config.clone());

    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;
    assert_eq!(client.calls().len(), 1);

    // an options-only edit publishes a new version but is not
    // execution-relevant
    tx.send_replace(config.set_options(&apura_model::OptionsPatch::new().show_total(true)));
    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;

    assert_eq!(client.calls().len(), 1);

    drop(tx);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn late_stale_response_is_discarded() {
    // first dispatch resolves long after the second
    let client = Arc::new(ScriptedAggregationClient::scripted(vec![
        ScriptedResponse::ok_after(Duration::from_millis(2_000), sample_result(1)),
        ScriptedResponse::ok_after(Duration::from_millis(10), sample_result(2)),
    ]));
    let (tx, handle) = spawn_with(Arc::clone(&client), executable_config());
    let results = handle.results();

    // dispatch 1
    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;

    // edit, then dispatch 2
    tx.send_replace(executable_config().add_field(month(), Bucket::Group));
    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;

    // response 2 (fast) lands first and is applied
    tokio::time::advance(Duration::from_millis(20)).await;
    settle().await;
    assert_eq!(results.borrow().as_ref().unwrap().len(), 2);

    // response 1 (slow) finally lands and must be discarded
    tokio::time::advance(Duration::from_millis(2_000)).await;
    settle().await;
    assert_eq!(results.borrow().as_ref().unwrap().len(), 2);

    assert_eq!(client.calls().len(), 2);
    drop(tx);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn failure_retains_the_previously_displayed_result() {
    let client = Arc::new(ScriptedAggregationClient::scripted(vec![
        ScriptedResponse::ok_after(Duration::from_millis(10), sample_result(5)),
        ScriptedResponse::err_after(
            Duration::from_millis(10),
            AggregationError::Network("boom".into()),
        ),
    ]));
    let (tx, handle) = spawn_with(Arc::clone(&client), executable_config());
    let results = handle.results();

    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;
    tokio::time::advance(Duration::from_millis(20)).await;
    settle().await;
    assert_eq!(results.borrow().as_ref().unwrap().len(), 5);

    tx.send_replace(executable_config().add_field(month(), Bucket::Group));
    tokio::time::advance(Duration::from_millis(600)).await;
    settle().await;
    tokio::time::advance(Duration::from_millis(20)).await;
    settle().await;

    // the failed execution is invisible: old rows stay
    assert_eq!(results.borrow().as_ref().unwrap().len(), 5);

    drop(tx);
    handle.join().await;
}

#[tokio::test(start_paused = true)]
async fn scheduler_exits_when_the_session_is_disposed() {
    let client = Arc::new(ScriptedAggregationClient::always(sample_result(1)));
    let (tx, handle) = spawn_with(client, AnalysisConfiguration::new("t"));

    drop(tx);
    handle.join().await;
}
