//! 并发解析测试：请求处理任务同时首次请求同一服务

#![allow(clippy::uninlined_format_args)]

use futures::future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wirebox::container::{Container, ContainerError, Lookup, ServiceConstructorMap};

#[derive(Debug)]
struct EngineHandle {
    endpoint: String,
}

#[derive(Debug)]
struct ImagesApi {
    engine: Arc<EngineHandle>,
}

#[derive(Debug)]
struct VolumesApi {
    engine: Arc<EngineHandle>,
}

fn api_constructors(creations: Arc<AtomicUsize>) -> ServiceConstructorMap {
    let mut map = ServiceConstructorMap::new();
    map.register("engine", move |_| {
        creations.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        Ok(EngineHandle {
            endpoint: "tcp://127.0.0.1:2375".to_string(),
        })
    });
    map.register("images", |lookup| {
        Ok(ImagesApi {
            engine: lookup.get_as::<EngineHandle>("engine")?,
        })
    });
    map.register("volumes", |lookup| {
        Ok(VolumesApi {
            engine: lookup.get_as::<EngineHandle>("engine")?,
        })
    });
    map
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_requests_construct_once() {
    let creations = Arc::new(AtomicUsize::new(0));
    let container = Container::with_constructors(api_constructors(creations.clone()));

    let mut handles = vec![];
    for _ in 0..100 {
        let container = container.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            container.get_as::<EngineHandle>("engine").unwrap()
        }));
    }

    let results = future::join_all(handles).await;

    let first = results[0].as_ref().unwrap().clone();
    for result in results {
        assert!(Arc::ptr_eq(&result.unwrap(), &first));
    }
    assert_eq!(creations.load(Ordering::SeqCst), 1);
    assert_eq!(first.endpoint, "tcp://127.0.0.1:2375");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dependents_share_one_dependency() {
    let creations = Arc::new(AtomicUsize::new(0));
    let container = Container::with_constructors(api_constructors(creations.clone()));

    let mut images = vec![];
    let mut volumes = vec![];
    for _ in 0..25 {
        let c = container.clone();
        images.push(tokio::task::spawn_blocking(move || c.get_as::<ImagesApi>("images")));
        let c = container.clone();
        volumes.push(tokio::task::spawn_blocking(move || c.get_as::<VolumesApi>("volumes")));
    }

    let images: Vec<_> = future::join_all(images)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();
    let volumes: Vec<_> = future::join_all(volumes)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();

    for api in &images {
        assert!(Arc::ptr_eq(api, &images[0]));
        assert!(Arc::ptr_eq(&api.engine, &volumes[0].engine));
    }
    for api in &volumes {
        assert!(Arc::ptr_eq(api, &volumes[0]));
    }
    assert_eq!(creations.load(Ordering::SeqCst), 1);
    assert_eq!(container.stats().constructions, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution_of_unknown_service() {
    let container = Container::new();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let container = container.clone();
            tokio::task::spawn_blocking(move || container.get(&format!("missing-{}", i % 4)))
        })
        .collect();

    for result in future::join_all(handles).await {
        assert!(matches!(result.unwrap(), Err(ContainerError::UnknownService(_))));
    }
    assert_eq!(container.stats().unknown_services, 20);
}
