//! Integration tests for tenant-level admin operations.
//!
//! These tests verify the app listing and its cache, workspace and dataset
//! listings, fetching app users, and the ways a tenant can be connected.

use std::io::Write;

use powerbi_api::{
    AppNameParams, AuthError, BearerToken, ConfigError, Credentials, HostUrl, PowerBiConfig,
    ResourceError, Tenant,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> PowerBiConfig {
    PowerBiConfig::builder()
        .host(HostUrl::new(server.uri()).unwrap())
        .authority_host(HostUrl::new(server.uri()).unwrap())
        .build()
}

fn tenant_for(server: &MockServer) -> Tenant {
    Tenant::new(&BearerToken::new("test-token").unwrap(), &config_for(server)).unwrap()
}

fn app_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "lastUpdate": "2024-01-02T03:04:05.678Z",
        "description": format!("{name} app"),
        "publishedBy": "Ada",
        "users": []
    })
}

fn dataset_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Dataset {id}"),
        "addRowsAPIEnabled": false,
        "isRefreshable": true,
        "isEffectiveIdentityRequired": false,
        "isEffectiveIdentityRolesRequired": false,
        "targetStorageMode": "Abf",
        "createdDate": "2021-06-01T08:00:00.000Z",
        "contentProviderType": "PbixInImportMode",
        "upstreamDatasets": [],
        "schemaMayNotBeUpToDate": false,
        "users": []
    })
}

fn workspace_json(id: &str, datasets: Option<Vec<serde_json::Value>>) -> serde_json::Value {
    let mut value = json!({
        "id": id,
        "isReadOnly": false,
        "isOnDedicatedCapacity": true,
        "type": "Workspace",
        "state": "Active",
        "name": format!("Workspace {id}")
    });
    if let Some(datasets) = datasets {
        value["datasets"] = serde_json::Value::Array(datasets);
    }
    value
}

async fn mount_apps(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/admin/apps"))
        .and(query_param("$top", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                app_json("1", "Foo"),
                app_json("2", "Foo [Dev]"),
                app_json("3", "Foo [Test]"),
                app_json("4", "Bar")
            ]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Apps
// ============================================================================

#[tokio::test]
async fn test_get_apps_as_admin_is_never_cached() {
    let server = MockServer::start().await;
    mount_apps(&server, 2).await;

    let tenant = tenant_for(&server);
    let first = tenant.get_apps_as_admin(Tenant::DEFAULT_TOP).await.unwrap();
    let second = tenant.get_apps_as_admin(Tenant::DEFAULT_TOP).await.unwrap();

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_apps_as_admin_passes_top() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/apps"))
        .and(query_param("$top", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [app_json("1", "Foo"), app_json("2", "Bar")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let apps = tenant_for(&server).get_apps_as_admin(2).await.unwrap();
    assert_eq!(apps[1].name, "Bar");
}

#[tokio::test]
async fn test_get_apps_by_names_loads_the_list_once() {
    let server = MockServer::start().await;
    mount_apps(&server, 1).await;

    let tenant = tenant_for(&server);
    let foo = tenant
        .get_apps_by_names(&["Foo"], AppNameParams::default())
        .await
        .unwrap();
    let bar = tenant
        .get_apps_by_names(&["Bar"], AppNameParams::default())
        .await
        .unwrap();

    assert_eq!(foo.len(), 1);
    assert_eq!(foo[0].id, "1");
    assert_eq!(bar.len(), 1);
    assert_eq!(bar[0].id, "4");
}

#[tokio::test]
async fn test_get_apps_by_names_includes_dev_variant() {
    let server = MockServer::start().await;
    mount_apps(&server, 1).await;

    let tenant = tenant_for(&server);
    let params = AppNameParams {
        include_dev: true,
        include_test: false,
    };
    let apps = tenant.get_apps_by_names(&["Foo"], params).await.unwrap();

    let names: Vec<&str> = apps.iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Foo [Dev]"]);
}

#[tokio::test]
async fn test_get_apps_by_names_follows_cache_order() {
    let server = MockServer::start().await;
    mount_apps(&server, 1).await;

    let tenant = tenant_for(&server);
    let params = AppNameParams {
        include_dev: true,
        include_test: true,
    };
    let requested = vec!["Bar".to_string(), "Foo".to_string()];
    let apps = tenant
        .get_apps_by_names(requested.as_slice(), params)
        .await
        .unwrap();

    let ids: Vec<&str> = apps.iter().map(|app| app.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(requested, vec!["Bar".to_string(), "Foo".to_string()]);
}

#[tokio::test]
async fn test_get_apps_by_names_without_match_is_empty() {
    let server = MockServer::start().await;
    mount_apps(&server, 1).await;

    let tenant = tenant_for(&server);
    let apps = tenant
        .get_apps_by_names(&["Nope"], AppNameParams::default())
        .await
        .unwrap();

    assert!(apps.is_empty());
}

#[tokio::test]
async fn test_failed_app_load_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/apps"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_apps(&server, 1).await;

    let tenant = tenant_for(&server);
    let first = tenant
        .get_apps_by_names(&["Foo"], AppNameParams::default())
        .await;
    assert!(matches!(first, Err(ResourceError::Http(_))));

    let second = tenant
        .get_apps_by_names(&["Foo"], AppNameParams::default())
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn test_get_app_users() {
    let server = MockServer::start().await;
    mount_apps(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/admin/apps/4/users"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {
                    "AppUserAccessRight": "Owner",
                    "emailAddress": "ada@contoso.com",
                    "displayName": "Ada",
                    "identifier": "ada@contoso.com",
                    "graphId": "g-1",
                    "principalType": "User"
                },
                {
                    "AppUserAccessRight": "Viewer",
                    "displayName": "Finance",
                    "identifier": "g-2",
                    "graphId": "g-2",
                    "principalType": "Group"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tenant = tenant_for(&server);
    let apps = tenant
        .get_apps_by_names(&["Bar"], AppNameParams::default())
        .await
        .unwrap();
    let users = apps[0].get_app_users(tenant.client()).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email_address.as_deref(), Some("ada@contoso.com"));
    assert!(users[1].email_address.is_none());
    assert_eq!(users[1].principal_type, "Group");
}

#[tokio::test]
async fn test_null_descriptive_fields_do_not_fail_listing() {
    let server = MockServer::start().await;

    let mut unpublished = app_json("5", "Draft");
    unpublished["description"] = serde_json::Value::Null;
    unpublished["publishedBy"] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/admin/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [app_json("1", "Foo"), unpublished]
        })))
        .mount(&server)
        .await;

    let apps = tenant_for(&server).get_apps_as_admin(10).await.unwrap();

    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].description.as_deref(), Some("Foo app"));
    assert!(apps[1].description.is_none());
    assert!(apps[1].published_by.is_none());
}

#[tokio::test]
async fn test_malformed_app_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "1", "name": "Foo"}]
        })))
        .mount(&server)
        .await;

    let result = tenant_for(&server).get_apps_as_admin(10).await;
    assert!(matches!(
        result,
        Err(ResourceError::Decode { resource: "App", .. })
    ));
}

// ============================================================================
// Workspaces and datasets
// ============================================================================

#[tokio::test]
async fn test_get_workspaces_filters_by_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/groups"))
        .and(query_param("$filter", "type eq 'Workspace'"))
        .and(query_param("$top", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [workspace_json("w1", None), workspace_json("w2", None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let workspaces = tenant_for(&server).get_workspaces(100).await.unwrap();

    assert_eq!(workspaces.len(), 2);
    assert_eq!(workspaces[0].workspace_type, "Workspace");
    assert!(workspaces.iter().all(|w| w.datasets.is_none()));
}

#[tokio::test]
async fn test_get_datasets_expands_and_stamps_datasets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/groups"))
        .and(query_param("$filter", "type eq 'Workspace'"))
        .and(query_param("$top", "5000"))
        .and(query_param("$expand", "datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                workspace_json("w1", Some(vec![dataset_json("d1"), dataset_json("d2")])),
                workspace_json("w2", Some(vec![]))
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let workspaces = tenant_for(&server)
        .get_datasets(Tenant::DEFAULT_TOP)
        .await
        .unwrap();

    let first: Vec<_> = workspaces[0].datasets().collect();
    assert_eq!(first.len(), 2);
    assert!(first
        .iter()
        .all(|dataset| dataset.workspace_id.as_deref() == Some("w1")));
    assert_eq!(workspaces[1].datasets, Some(vec![]));
}

// ============================================================================
// Connecting
// ============================================================================

#[tokio::test]
async fn test_connect_with_token_makes_no_auth_call() {
    let server = MockServer::start().await;
    mount_apps(&server, 1).await;

    let credentials = Credentials::token("pre-issued").unwrap();
    let tenant = Tenant::connect(&credentials, &config_for(&server))
        .await
        .unwrap();

    assert!(tenant.get_apps_as_admin(Tenant::DEFAULT_TOP).await.is_ok());
}

#[tokio::test]
async fn test_connect_with_service_principal_mints_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contoso/oauth2/token"))
        .and(body_string_contains("client_id=app-id"))
        .and(body_string_contains(
            "resource=https%3A%2F%2Fanalysis.windows.net%2Fpowerbi%2Fapi",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "minted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/groups"))
        .and(header("Authorization", "Bearer minted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::service_principal("contoso", "app-id", "secret").unwrap();
    let tenant = Tenant::connect(&credentials, &config_for(&server))
        .await
        .unwrap();

    assert!(tenant.get_workspaces(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_authenticate_by_file_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/groups"))
        .and(header("Authorization", "Bearer from-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "token: from-file").unwrap();

    let tenant = Tenant::authenticate_by_file(file.path(), &config_for(&server))
        .await
        .unwrap();

    assert!(tenant.get_workspaces(1).await.is_ok());
}

#[tokio::test]
async fn test_authenticate_by_file_with_incomplete_principal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tenant_id: contoso").unwrap();
    writeln!(file, "client_secret: shh").unwrap();

    let result = Tenant::authenticate_by_file(file.path(), &PowerBiConfig::default()).await;

    assert!(matches!(
        result,
        Err(AuthError::Config(ConfigError::MissingRequiredField {
            field: "client_id"
        }))
    ));
}

#[tokio::test]
async fn test_authenticate_by_missing_file() {
    let result =
        Tenant::authenticate_by_file("/no/such/powerbi.yml", &PowerBiConfig::default()).await;

    assert!(matches!(
        result,
        Err(AuthError::Config(ConfigError::CredentialsFile { .. }))
    ));
}
