use poem::listener::TcpListener;
use poem::{get, handler, Route, Server};
use withdrawer_index::{IndexSource, IndexStatus, WithdrawalIndexHolder};
use withdrawer_types::Hash;

#[tokio::test]
async fn load_from_file() {
    super::init();
    let path = super::temp_file(&super::document(&[(1, 10), (2, 20)]));

    let holder = WithdrawalIndexHolder::load(IndexSource::File(path)).await;
    let snapshot = holder.snapshot();
    assert_eq!(snapshot.status, IndexStatus::Loaded);
    assert_eq!(snapshot.index.len(), 2);
    assert!(snapshot.index.lookup(&Hash::repeat_byte(2)).is_ok());
}

#[tokio::test]
async fn missing_file_degrades_to_empty_index() {
    super::init();
    let path = std::env::temp_dir().join("withdrawer-index-does-not-exist.json");

    let holder = WithdrawalIndexHolder::load(IndexSource::File(path)).await;
    let snapshot = holder.snapshot();
    assert!(snapshot.index.is_empty());
    assert!(matches!(snapshot.status, IndexStatus::Unavailable(_)));
    assert!(snapshot.index.lookup(&Hash::repeat_byte(1)).is_err());
}

#[tokio::test]
async fn reload_swaps_snapshot() {
    super::init();
    let path = super::temp_file(&super::document(&[(1, 10)]));
    let holder = WithdrawalIndexHolder::load(IndexSource::File(path.clone())).await;
    let before = holder.snapshot();

    std::fs::write(&path, super::document(&[(1, 10), (2, 20), (3, 30)])).unwrap();
    assert_eq!(holder.reload().await.unwrap(), 3);

    // Snapshots taken earlier are unaffected.
    assert_eq!(before.index.len(), 1);
    assert_eq!(holder.snapshot().index.len(), 3);
}

#[tokio::test]
async fn failed_reload_keeps_previous_snapshot() {
    super::init();
    let path = super::temp_file(&super::document(&[(1, 10), (2, 20)]));
    let holder = WithdrawalIndexHolder::load(IndexSource::File(path.clone())).await;

    std::fs::write(&path, "{ not json").unwrap();
    assert!(holder.reload().await.is_err());

    let snapshot = holder.snapshot();
    assert_eq!(snapshot.status, IndexStatus::Loaded);
    assert_eq!(snapshot.index.len(), 2);
}

#[handler]
fn withdrawals() -> String {
    super::document(&[(7, 70)])
}

#[tokio::test]
async fn load_from_url() {
    super::init();
    let addr = format!("localhost:{}", portpicker::pick_unused_port().unwrap());
    let route = Route::new().at("/withdrawals.json", get(withdrawals));
    tokio::spawn(Server::new(TcpListener::bind(addr.clone())).run(route));

    // Wait to start listen
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let source = format!("http://{addr}/withdrawals.json").parse().unwrap();
    let holder = WithdrawalIndexHolder::load(source).await;
    let snapshot = holder.snapshot();
    assert_eq!(snapshot.status, IndexStatus::Loaded);
    assert!(snapshot.index.lookup(&Hash::repeat_byte(7)).is_ok());
}
