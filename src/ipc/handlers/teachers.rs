use crate::csv_import::TEACHER_SCHEMA;
use crate::directory::{new_entry_id, Teacher, TeacherInput};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{
    get_optional_str, get_required_str, import_into, parse_params, require_filled, to_json,
    HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn parse_teacher_input(params: &Value) -> Result<Teacher, HandlerErr> {
    let input: TeacherInput = parse_params(params)?;
    require_filled(&input.nama, "nama")?;
    require_filled(&input.nip, "nip")?;
    require_filled(&input.telepon, "telepon")?;
    require_filled(&input.email, "email")?;
    let teacher = Teacher::from_input(String::new(), input);
    if teacher.mata_pelajaran.is_empty() {
        return Err(HandlerErr::new("bad_params", "missing mataPelajaran"));
    }
    Ok(teacher)
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> Value {
    let search = get_optional_str(&req.params, "search").unwrap_or_default();
    let teachers = state.teachers.search(&search);
    ok(
        &req.id,
        json!({
            "teachers": to_json(&teachers),
            "total": state.teachers.len()
        }),
    )
}

fn handle_teachers_get(state: &mut AppState, req: &Request) -> Value {
    let id = match get_required_str(&req.params, "id") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match state.teachers.get(&id) {
        Some(t) => ok(&req.id, json!({ "teacher": to_json(t) })),
        None => err(&req.id, "not_found", "teacher not found", Some(json!({ "id": id }))),
    }
}

fn handle_teachers_create(state: &mut AppState, req: &Request) -> Value {
    let mut teacher = match parse_teacher_input(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    teacher.id = new_entry_id("g");
    let created = state.teachers.create(teacher);
    tracing::info!(id = %created.id, "teacher created");
    ok(
        &req.id,
        json!({
            "teacher": to_json(created),
            "message": format!("Data guru \"{}\" berhasil ditambahkan.", created.nama)
        }),
    )
}

fn handle_teachers_update(state: &mut AppState, req: &Request) -> Value {
    let id = match get_required_str(&req.params, "id") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let teacher = match parse_teacher_input(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match state.teachers.update(&id, teacher) {
        Some(t) => ok(
            &req.id,
            json!({
                "teacher": to_json(t),
                "message": format!("Data guru \"{}\" berhasil diperbarui.", t.nama)
            }),
        ),
        None => err(&req.id, "not_found", "teacher not found", Some(json!({ "id": id }))),
    }
}

fn handle_teachers_delete(state: &mut AppState, req: &Request) -> Value {
    let id = match get_required_str(&req.params, "id") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let deleted = state.teachers.delete(&id);
    if deleted {
        tracing::info!(id = %id, "teacher deleted");
    }
    ok(&req.id, json!({ "deleted": deleted }))
}

fn handle_teachers_import_csv(state: &mut AppState, req: &Request) -> Value {
    let notice_ms = state.config.notice_dismiss_ms();
    match import_into(
        &mut state.teachers,
        &TEACHER_SCHEMA,
        &req.params,
        notice_ms,
        "teachers",
        Teacher::from_record,
    ) {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "teachers.list" => Some(handle_teachers_list(state, req)),
        "teachers.get" => Some(handle_teachers_get(state, req)),
        "teachers.create" => Some(handle_teachers_create(state, req)),
        "teachers.update" => Some(handle_teachers_update(state, req)),
        "teachers.delete" => Some(handle_teachers_delete(state, req)),
        "teachers.importCsv" => Some(handle_teachers_import_csv(state, req)),
        _ => None,
    }
}
