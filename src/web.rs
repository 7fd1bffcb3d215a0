use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use std::sync::Mutex;

use crate::config::Config;
use crate::directory::DoctorDirectory;
use crate::error::{Error, Result};
use crate::schedule::{time, Occupant, RoomSchedules, SlotChange};
use crate::storage::JsonCollection;

/// Shared state handed to every handler. Each mutex serializes the whole
/// load-mutate-persist cycle of its collection, so two concurrent changes
/// can never both pass the conflict check against the same stale snapshot.
/// Nothing awaits while a lock is held.
pub struct AppState {
    pub schedules: Mutex<RoomSchedules>,
    pub doctors: Mutex<DoctorDirectory>,
    pub admin_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
struct DoctorPayload {
    name: String,
    specialty: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoctorUpdate {
    old_name: String,
    old_specialty: String,
    new_name: String,
    new_specialty: String,
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    if req.password == state.admin_password {
        session.insert("admin", true)?;
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

async fn session_info(session: Session) -> actix_web::Result<HttpResponse> {
    let admin = session.get::<bool>("admin")?.unwrap_or(false);
    Ok(HttpResponse::Ok().json(serde_json::json!({"admin": admin})))
}

// Room endpoints
async fn list_rooms(state: web::Data<AppState>) -> Result<HttpResponse> {
    let rooms = state.schedules.lock().unwrap().list()?;
    Ok(HttpResponse::Ok().json(rooms))
}

async fn update_room(
    change: web::Json<SlotChange>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let room = state.schedules.lock().unwrap().upsert_slot(&change)?;
    Ok(HttpResponse::Ok().json(room))
}

/// Live occupancy: resolve the entry covering this moment, then confirm the
/// doctor against the directory so a stale schedule cannot display someone
/// who was removed from it.
async fn room_occupant(
    number: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let number = number.into_inner();
    let now = time::now();
    let entry = state
        .schedules
        .lock()
        .unwrap()
        .occupant_now(&number, &now.day, &now.time)?;
    let doctor = state
        .doctors
        .lock()
        .unwrap()
        .find(&entry.name, &entry.specialty)?
        .ok_or_else(|| {
            Error::NotFound(format!(
                "doctor {} ({}) is not in the directory",
                entry.name, entry.specialty
            ))
        })?;
    Ok(HttpResponse::Ok().json(Occupant {
        name: doctor.name,
        specialty: doctor.specialty,
        from_time: entry.from_time,
        to_time: entry.to_time,
    }))
}

// Doctor directory endpoints
async fn list_doctors(state: web::Data<AppState>) -> Result<HttpResponse> {
    let doctors = state.doctors.lock().unwrap().list()?;
    Ok(HttpResponse::Ok().json(doctors))
}

async fn add_doctor(
    req: web::Json<DoctorPayload>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.doctors.lock().unwrap().add(&req.name, &req.specialty)?;
    Ok(HttpResponse::Created().json(serde_json::json!({"message": "Doctor added successfully"})))
}

async fn update_doctor(
    req: web::Json<DoctorUpdate>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.doctors.lock().unwrap().update(
        &req.old_name,
        &req.old_specialty,
        &req.new_name,
        &req.new_specialty,
    )?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Doctor updated successfully"})))
}

async fn remove_doctor(
    req: web::Json<DoctorPayload>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state
        .doctors
        .lock()
        .unwrap()
        .remove(&req.name, &req.specialty)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Doctor removed successfully"})))
}

pub fn app_state(config: &Config) -> web::Data<AppState> {
    web::Data::new(AppState {
        schedules: Mutex::new(RoomSchedules::new(
            JsonCollection::new(config.data_dir.join("rooms.json")),
            config.days.clone(),
        )),
        doctors: Mutex::new(DoctorDirectory::new(JsonCollection::new(
            config.data_dir.join("doctors.json"),
        ))),
        admin_password: config.admin_password.clone(),
    })
}

/// Body-deserialization failures come back in the same error envelope the
/// domain uses.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| Error::Validation(err.to_string()).into())
}

fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/session", web::get().to(session_info))
        .route("/api/rooms", web::get().to(list_rooms))
        .route("/api/rooms", web::post().to(update_room))
        .service(web::resource("/api/room/{number}").route(web::get().to(room_occupant)))
        .route("/api/doctors", web::get().to(list_doctors))
        .route("/api/doctors", web::post().to(add_doctor))
        .route("/api/doctors", web::put().to(update_doctor))
        .route("/api/doctors", web::delete().to(remove_doctor));
}

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let app_state = app_state(&config);
    // One key for all workers; restarting the process clears admin sessions.
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(json_config())
            .wrap(middleware::Logger::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .configure(api_routes)
            .service(Files::new("/static", "static"))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
