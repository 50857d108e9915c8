use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    lead::Lead,
    lead_email::LeadEmail,
    lead_name::LeadName,
    lead_phone::LeadPhone,
    new_lead::{LeadBody, NewLead, ValidationErrors},
};
use crate::notifier::NotifierHandle;

const DUPLICATE_EMAIL_MESSAGE: &str =
    "This email has already been registered. Each email can only be submitted once.";
// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION_CODE: &str = "23505";

#[derive(serde::Serialize)]
struct LeadCreatedResponse {
    success: bool,
    message: String,
}

#[derive(serde::Serialize)]
struct LeadFailureResponse {
    success: bool,
    errors: ValidationErrors,
}

impl LeadFailureResponse {
    fn bad_request(errors: ValidationErrors) -> HttpResponse {
        HttpResponse::BadRequest().json(LeadFailureResponse {
            success: false,
            errors,
        })
    }
}

#[tracing::instrument(
    name = "Creating a new lead handler",
    skip(body, db_pool, notifier),
    fields(
        lead_email = ?body.email,
        lead_name = ?body.name
    )
)]
pub async fn handle_create_lead(
    body: web::Json<LeadBody>,
    db_pool: web::Data<PgPool>,
    notifier: web::Data<NotifierHandle>,
) -> impl Responder {
    let new_lead = match NewLead::parse(body.into_inner()) {
        Ok(lead) => lead,
        Err(errors) => {
            tracing::warn!("Validation error: {:?}", errors);
            return LeadFailureResponse::bad_request(errors);
        }
    };

    if let Err(err) = insert_lead(&new_lead, &db_pool).await {
        if is_unique_violation(&err) {
            tracing::warn!(
                "Duplicate lead submission for {}",
                new_lead.email.as_ref()
            );
            return LeadFailureResponse::bad_request(ValidationErrors::single(
                "email",
                DUPLICATE_EMAIL_MESSAGE,
            ));
        }

        tracing::error!("Failed to insert new lead: {:?}", err);
        return HttpResponse::InternalServerError().finish();
    }

    // Fire-and-forget: the response never waits on the email outcome
    notifier.dispatch(
        new_lead.email.clone(),
        String::from(new_lead.full_name.as_ref()),
    );

    HttpResponse::Created().json(LeadCreatedResponse {
        success: true,
        message: String::from("Roadmap email sent"),
    })
}

#[tracing::instrument(name = "Listing all leads handler", skip(db_pool))]
pub async fn handle_list_leads(db_pool: web::Data<PgPool>) -> impl Responder {
    match fetch_leads(&db_pool).await {
        Ok(leads) => HttpResponse::Ok().json(leads),
        Err(err) => {
            tracing::error!("Failed to fetch leads: {:?}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[tracing::instrument(name = "Insert a new lead into the database", skip(new_lead, db_pool))]
async fn insert_lead(new_lead: &NewLead, db_pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO leads (email, full_name, phone_number, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(new_lead.email.as_ref())
    .bind(new_lead.full_name.as_ref())
    .bind(new_lead.phone_number.as_ref())
    .bind(Utc::now())
    .execute(db_pool)
    .await?;

    Ok(())
}

#[tracing::instrument(name = "Fetch all leads from the database", skip(db_pool))]
async fn fetch_leads(db_pool: &PgPool) -> Result<Vec<Lead>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT email, full_name, phone_number, created_at
        FROM leads
        ORDER BY created_at DESC
        "#,
    )
    .map(|row: PgRow| Lead {
        email: LeadEmail::parse(row.get("email")).unwrap(),
        full_name: LeadName::parse(row.get("full_name")).unwrap(),
        phone_number: LeadPhone::parse(row.get("phone_number")).unwrap(),
        created_at: row.get("created_at"),
    })
    .fetch_all(db_pool)
    .await
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION_CODE),
        _ => false,
    }
}
