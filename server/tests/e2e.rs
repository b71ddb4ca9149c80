//! Full inscription flow: wizard -> proxy -> upstream, all in one process.

use inscription::benefits::schedule_key;
use inscription::client::PortalClient;
use inscription::wizard::{Step, Wizard};
use serde_json::json;
use server::{app, config::Config, state::AppState};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn a_member_inscribes_into_a_sport() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/benefits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sports": [{
                "id": "futbol-5",
                "name": "Fútbol 5",
                "max_capacity": 20,
                "teachers": ["Prof. Gómez"],
                "times": [{
                    "day": "Lunes",
                    "hour_from": "18:00",
                    "hour_to": "20:00",
                    "place": "Campus",
                }],
            }],
            "activities": [],
            "agreements": [],
            "languages": [],
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/inscription"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Inscripto" })),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let state = AppState::with_config(Config {
        port: 0,
        upstream_url: upstream.uri(),
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    let client = PortalClient::new(format!("http://{address}"));

    let catalogue = client.fetch_benefits().await.unwrap();
    let benefit = catalogue.find("Fútbol 5").unwrap();

    let mut wizard = Wizard::new(benefit);

    wizard.form.personal.first_name = "Ana".to_string();
    wizard.form.personal.last_name = "Diaz".to_string();
    wizard.form.personal.student_id = "12345".to_string();
    wizard.form.personal.career = "Ingeniería Informática".to_string();
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::Contact);

    wizard.form.contact.email = "ana@itba.edu.ar".to_string();
    wizard.form.contact.phone = "1122334455".to_string();
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::Preferences);

    let key = schedule_key(&wizard.benefit().times()[0]);
    wizard.form.toggle_schedule(&key);
    wizard.form.preferences.terms_accepted = true;

    assert!(wizard.submit(&client).await);
    assert_eq!(wizard.step(), Step::Done);
    assert_eq!(wizard.last_error(), None);
}
