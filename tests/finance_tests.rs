mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn dues_populate_the_paying_member() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;

    let (status, dues) = app
        .post("/api/cotisations", &token, json!({ "membre": member, "montant": 25 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dues["statut"], "payé");
    assert_eq!(dues["membre"]["email"], "d@x.com");
    assert!(dues["date"].is_string());

    let (_, list) = app.get("/api/dues", &token).await;
    assert_eq!(list[0]["membre"]["_id"], member.as_str());
    assert_eq!(list[0]["membre"]["cotisations"], json!([dues["_id"].clone()]));

    let (_, fetched) = app.get(&format!("/api/membres/{}", member), &token).await;
    assert_eq!(fetched["cotisations"], json!([dues["_id"].clone()]));
}

#[tokio::test]
async fn dues_for_unknown_member_are_rejected() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let missing = bson::oid::ObjectId::new().to_hex();

    let (status, body) = app
        .post("/api/cotisations", &token, json!({ "membre": missing, "montant": 25 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "membre");

    let (status, body) = app
        .post("/api/cotisations", &token, json!({ "membre": "zzzzzzzzzzzzzzzzzzzzzzzz", "montant": 25 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "Identifiant de membre invalide");
    assert_eq!(app.repos.dues.count().await.unwrap(), 0);
}

#[tokio::test]
async fn dues_status_can_be_marked_late() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;
    let (_, dues) = app
        .post("/api/cotisations/ajouter", &token, json!({ "membre": member, "montant": 25 }))
        .await;
    let id = dues["_id"].as_str().unwrap();

    let (status, updated) = app
        .put(&format!("/api/cotisations/{}", id), &token, json!({ "statut": "en retard" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["statut"], "en retard");
    assert_eq!(updated["montant"], dues["montant"]);

    let (status, _) = app
        .put(&format!("/api/cotisations/{}", id), &token, json!({ "statut": "perdu" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn loans_round_trip_and_delete() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;

    let (status, loan) = app
        .post(
            "/api/prets",
            &token,
            json!({
                "beneficiaire": member,
                "montant": 1000,
                "interet": 3.5,
                "duree": 12,
                "dateDebut": "2024-02-01T00:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["statut"], "actif");
    assert_eq!(loan["interet"], 3.5);
    assert_eq!(loan["duree"], 12);
    assert_eq!(loan["dateDebut"], "2024-02-01T00:00:00Z");
    assert_eq!(loan["beneficiaire"]["nom"], "Dupont");

    let id = loan["_id"].as_str().unwrap();
    let (status, repaid) = app
        .put(&format!("/api/loans/{}", id), &token, json!({ "statut": "remboursé" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repaid["statut"], "remboursé");

    let (status, body) = app.delete(&format!("/api/prets/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Prêt supprimé");
    let (status, _) = app.delete(&format!("/api/prets/{}", id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn loan_without_interest_persists_nothing() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;

    let (status, body) = app
        .post("/api/prets", &token, json!({ "beneficiaire": member, "montant": 1000, "duree": 12 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "interet");
    assert_eq!(app.repos.loans.count().await.unwrap(), 0);
}

#[tokio::test]
async fn aid_round_trip_with_optional_description() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;

    let (status, aid) = app
        .post(
            "/api/aides",
            &token,
            json!({ "beneficiaire": member, "typeAide": "médicale", "montant": 150 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(aid["typeAide"], "médicale");
    assert!(aid.get("description").is_none());

    let id = aid["_id"].as_str().unwrap();
    let (status, updated) = app
        .put(&format!("/api/aid/{}", id), &token, json!({ "description": "Hospitalisation" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Hospitalisation");
    assert_eq!(updated["typeAide"], "médicale");

    let (status, fetched) = app.get(&format!("/api/aides/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["beneficiaire"]["_id"], member.as_str());

    let (status, cleared) = app
        .put(&format!("/api/aides/{}", id), &token, json!({ "description": null }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared.get("description").is_none());

    let (status, body) = app.delete(&format!("/api/aides/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Aide supprimée");
    let (status, _) = app.delete(&format!("/api/aides/{}", id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;

    let (status, body) = app
        .post(
            "/api/aides",
            &token,
            json!({ "beneficiaire": member, "typeAide": "scolaire", "montant": -10 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "montant");
}

#[tokio::test]
async fn second_delete_of_dues_is_not_found() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let member = app.create_member(&token, "d@x.com").await;
    let (_, dues) = app
        .post("/api/cotisations", &token, json!({ "membre": member, "montant": 25 }))
        .await;
    let id = dues["_id"].as_str().unwrap();

    let (status, body) = app.delete(&format!("/api/cotisations/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Cotisation supprimée");
    let (status, body) = app.delete(&format!("/api/cotisations/{}", id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Cotisation non trouvée");
}

#[tokio::test]
async fn update_and_delete_of_unknown_finance_records_are_not_found() {
    let app = spawn_app().await;
    let token = app.admin_token().await;
    let missing = bson::oid::ObjectId::new().to_hex();

    let cases = [
        ("/api/cotisations", json!({ "statut": "en retard" }), "Cotisation non trouvée"),
        ("/api/prets", json!({ "statut": "remboursé" }), "Prêt non trouvé"),
        ("/api/aides", json!({ "montant": 10 }), "Aide non trouvée"),
    ];
    for (base, update, msg) in cases {
        let uri = format!("{}/{}", base, missing);

        let (status, body) = app.put(&uri, &token, update).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);
        assert_eq!(body["msg"], msg);

        let (status, body) = app.delete(&uri, &token).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
        assert_eq!(body["msg"], msg);
    }
}
