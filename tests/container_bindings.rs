// tests/container_bindings.rs
mod support;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use support::{StubAuthServer, build_test_container, test_env};
use webui_auth::{
    application::{dto::UserPassLoginRequest, ports::SessionStorePort},
    infrastructure::{
        gateway::EnvConfigGateway,
        ioc::{
            Container, ContainerBuilder, ContainerError, GatewayOptions, RequestContext, Scope,
            container_config::{finish_container, register_gateways},
            symbols::{controllers, gateways, input_port, usecase_factory},
        },
        session_store::InMemorySessionStore,
    },
    presentation::http::{response::ResponseHandle, session::SessionHandle},
};

fn production_container() -> Container {
    let mut builder = ContainerBuilder::new();
    register_gateways(
        &mut builder,
        GatewayOptions {
            env_config: test_env(),
            auth_request_timeout: Duration::from_secs(5),
        },
    )
    .expect("gateways register");
    finish_container(builder).expect("container is complete")
}

async fn request_context(store: &Arc<SessionStorePort>) -> RequestContext {
    RequestContext {
        session: SessionHandle::open(Arc::clone(store), None).await.unwrap(),
        response: ResponseHandle::new(),
    }
}

#[tokio::test]
async fn every_port_resolves_with_production_gateways() {
    let container = production_container();
    let store: Arc<SessionStorePort> = Arc::new(InMemorySessionStore::new());

    assert!(container.get(gateways::AUTH_SERVER).is_ok());
    assert!(container.get(gateways::ENV_CONFIG).is_ok());
    assert!(container.get(gateways::CLOCK).is_ok());
    assert!(container.get(controllers::USERPASS_LOGIN).is_ok());
    assert!(container.get(controllers::LOGIN_CONFIG).is_ok());
    assert!(container.get(usecase_factory::USERPASS_LOGIN).is_ok());
    assert!(container.get(usecase_factory::LOGIN_CONFIG).is_ok());

    let scope = container.request_scope(request_context(&store).await);
    assert!(scope.get(input_port::USERPASS_LOGIN).is_ok());
    assert!(scope.get(input_port::LOGIN_CONFIG).is_ok());
}

#[test]
fn lifetimes_follow_the_binding_table() {
    let container = production_container();
    assert_eq!(container.scope_of(gateways::AUTH_SERVER), Some(Scope::Singleton));
    assert_eq!(container.scope_of(gateways::ENV_CONFIG), Some(Scope::Singleton));
    assert_eq!(container.scope_of(input_port::USERPASS_LOGIN), Some(Scope::Request));
    assert_eq!(container.scope_of(input_port::LOGIN_CONFIG), Some(Scope::Request));
    assert_eq!(container.scope_of(controllers::USERPASS_LOGIN), Some(Scope::Transient));
}

#[test]
fn gateways_resolve_to_one_shared_instance() {
    let container = production_container();
    let a = container.get(gateways::AUTH_SERVER).unwrap();
    let b = container.get(gateways::AUTH_SERVER).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let a = container.get(gateways::ENV_CONFIG).unwrap();
    let b = container.clone().get(gateways::ENV_CONFIG).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_resolution_yields_one_gateway() {
    let container = production_container();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let container = container.clone();
            tokio::spawn(async move { container.get(gateways::AUTH_SERVER).unwrap() })
        })
        .collect();

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.unwrap());
    }
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn input_ports_are_fresh_per_request_and_shared_within_one() {
    let container = production_container();
    let store: Arc<SessionStorePort> = Arc::new(InMemorySessionStore::new());

    let first = container.request_scope(request_context(&store).await);
    let a = first.get(input_port::USERPASS_LOGIN).unwrap();
    let b = first.get(input_port::USERPASS_LOGIN).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let second = container.request_scope(request_context(&store).await);
    let c = second.get(input_port::USERPASS_LOGIN).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn input_port_needs_a_request() {
    let container = production_container();
    let err = container.get(input_port::LOGIN_CONFIG).err().unwrap();
    assert_eq!(err, ContainerError::MissingRequestContext("LoginConfigInputPort"));
}

#[tokio::test]
async fn factory_builds_independent_use_cases() {
    let auth = StubAuthServer::accepting();
    let container = build_test_container(auth.clone());
    let store: Arc<SessionStorePort> = Arc::new(InMemorySessionStore::new());
    let factory = container.get(usecase_factory::USERPASS_LOGIN).unwrap();

    let first = request_context(&store).await;
    let second = request_context(&store).await;
    let use_case_a = factory
        .call((first.session.clone(), first.response.clone()))
        .unwrap();
    let use_case_b = factory
        .call((second.session.clone(), second.response.clone()))
        .unwrap();
    assert!(!Arc::ptr_eq(&use_case_a, &use_case_b));

    use_case_a
        .execute(UserPassLoginRequest {
            username: "alice".into(),
            password: "secret".into(),
            account: "root".into(),
            ..UserPassLoginRequest::default()
        })
        .await
        .unwrap();
    use_case_b
        .execute(UserPassLoginRequest::default())
        .await
        .unwrap();

    assert_eq!(first.response.peek().unwrap().status, StatusCode::OK);
    assert!(first.session.user().is_some());
    assert_eq!(second.response.peek().unwrap().status, StatusCode::BAD_REQUEST);
    assert!(second.session.user().is_none());
    assert_eq!(auth.calls().len(), 1);
}

#[test]
fn unbound_port_fails_the_same_way_every_time() {
    let container = ContainerBuilder::new().build();
    let first = container.get(gateways::AUTH_SERVER).err().unwrap();
    let second = container.get(gateways::AUTH_SERVER).err().unwrap();
    assert_eq!(first, ContainerError::Unbound("AuthServerGateway"));
    assert_eq!(first, second);
}

#[test]
fn container_without_gateways_is_rejected_at_startup() {
    let err = finish_container(ContainerBuilder::new()).err().unwrap();
    assert!(matches!(err, ContainerError::Unbound(_)));
}

#[test]
fn gateway_rebinding_is_rejected() {
    let mut builder = ContainerBuilder::new();
    let options = || GatewayOptions {
        env_config: EnvConfigGateway::default(),
        auth_request_timeout: Duration::from_secs(1),
    };
    register_gateways(&mut builder, options()).unwrap();
    let err = register_gateways(&mut builder, options()).unwrap_err();
    assert_eq!(err, ContainerError::AlreadyBound("EnvConfigGateway"));
}
