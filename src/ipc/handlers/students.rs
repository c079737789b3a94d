use crate::csv_import::STUDENT_SCHEMA;
use crate::directory::{new_entry_id, Student, StudentInput};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{
    get_optional_str, get_required_str, import_into, parse_params, require_filled, to_json,
    HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn parse_student_input(params: &Value) -> Result<StudentInput, HandlerErr> {
    let input: StudentInput = parse_params(params)?;
    require_filled(&input.nama, "nama")?;
    require_filled(&input.nis, "nis")?;
    require_filled(&input.nisn, "nisn")?;
    require_filled(&input.kelas, "kelas")?;
    require_filled(&input.telepon, "telepon")?;
    require_filled(&input.alamat, "alamat")?;
    require_filled(&input.nama_wali, "namaWali")?;
    Ok(input)
}

fn handle_students_list(state: &mut AppState, req: &Request) -> Value {
    let search = get_optional_str(&req.params, "search").unwrap_or_default();
    let kelas = get_optional_str(&req.params, "kelas");
    let students = state.students.filter(&search, kelas.as_deref());
    ok(
        &req.id,
        json!({
            "students": to_json(&students),
            "classes": state.students.classes(),
            "total": state.students.len()
        }),
    )
}

fn handle_students_get(state: &mut AppState, req: &Request) -> Value {
    let id = match get_required_str(&req.params, "id") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match state.students.get(&id) {
        Some(s) => ok(&req.id, json!({ "student": to_json(s) })),
        None => err(&req.id, "not_found", "student not found", Some(json!({ "id": id }))),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> Value {
    let input = match parse_student_input(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let created = state
        .students
        .create(Student::from_input(new_entry_id("s"), input));
    tracing::info!(id = %created.id, "student created");
    ok(&req.id, json!({ "student": to_json(created) }))
}

fn handle_students_update(state: &mut AppState, req: &Request) -> Value {
    let id = match get_required_str(&req.params, "id") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let input = match parse_student_input(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match state
        .students
        .update(&id, Student::from_input(id.clone(), input))
    {
        Some(s) => ok(&req.id, json!({ "student": to_json(s) })),
        None => err(&req.id, "not_found", "student not found", Some(json!({ "id": id }))),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> Value {
    let id = match get_required_str(&req.params, "id") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let deleted = state.students.delete(&id);
    if deleted {
        tracing::info!(id = %id, "student deleted");
    }
    ok(&req.id, json!({ "deleted": deleted }))
}

fn handle_students_import_csv(state: &mut AppState, req: &Request) -> Value {
    let notice_ms = state.config.notice_dismiss_ms();
    match import_into(
        &mut state.students,
        &STUDENT_SCHEMA,
        &req.params,
        notice_ms,
        "students",
        Student::from_record,
    ) {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        "students.importCsv" => Some(handle_students_import_csv(state, req)),
        _ => None,
    }
}
