mod test_support;

use serde_json::json;
use test_support::{error_code, request, request_ok, spawn_sidecar};

#[test]
fn students_create_update_delete_roundtrip() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.create",
        json!({
            "nama": "Fajar Nugroho",
            "nis": "12349",
            "nisn": "0056789012",
            "kelas": "VII A",
            "alamat": "Jl. Diponegoro No. 5",
            "telepon": "081234567894",
            "namaWali": "Gunawan",
            "tanggalLulus": ""
        }),
    );
    let id = created["student"]["id"].as_str().expect("id").to_string();
    assert!(id.starts_with("s-"));
    assert!(created["student"].get("tanggalLulus").is_none());

    let list = request_ok(&mut stdin, &mut reader, "2", "students.list", json!({}));
    assert_eq!(list["students"][0]["id"].as_str(), Some(id.as_str()));
    assert_eq!(list["total"].as_u64(), Some(5));

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.update",
        json!({
            "id": id,
            "nama": "Fajar N.",
            "nis": "12349",
            "nisn": "0056789012",
            "kelas": "VII B",
            "alamat": "Jl. Diponegoro No. 5",
            "telepon": "081234567894",
            "namaWali": "Gunawan"
        }),
    );
    assert_eq!(updated["student"]["id"].as_str(), Some(id.as_str()));
    assert_eq!(updated["student"]["kelas"].as_str(), Some("VII B"));

    let filtered = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.list",
        json!({ "kelas": "VII B" }),
    );
    assert_eq!(filtered["students"].as_array().map(|v| v.len()), Some(1));

    let deleted = request_ok(&mut stdin, &mut reader, "5", "students.delete", json!({ "id": id }));
    assert_eq!(deleted["deleted"].as_bool(), Some(true));
    let gone = request(&mut stdin, &mut reader, "6", "students.get", json!({ "id": id }));
    assert_eq!(error_code(&gone), Some("not_found"));
}

#[test]
fn students_create_requires_every_form_field() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let full = json!({
        "nama": "Gita",
        "nis": "12350",
        "nisn": "0067890123",
        "kelas": "VIII B",
        "alamat": "Jl. Kartini No. 6",
        "telepon": "081234567895",
        "namaWali": "Hasan"
    });
    for (i, key) in ["nama", "nis", "nisn", "kelas", "alamat", "telepon", "namaWali"]
        .iter()
        .enumerate()
    {
        let mut params = full.clone();
        params[*key] = json!("  ");
        let resp = request(&mut stdin, &mut reader, &i.to_string(), "students.create", params);
        assert_eq!(error_code(&resp), Some("bad_params"), "blank {}", key);
        assert_eq!(
            resp.pointer("/error/message").and_then(|v| v.as_str()),
            Some(format!("missing {}", key).as_str())
        );
    }

    // foto and tanggalLulus stay optional.
    let created = request_ok(&mut stdin, &mut reader, "ok", "students.create", full);
    assert_eq!(created["student"]["foto"].as_str(), Some(""));
    let list = request_ok(&mut stdin, &mut reader, "list", "students.list", json!({}));
    assert_eq!(list["total"].as_u64(), Some(5));
}

#[test]
fn teachers_form_subjects_split_on_comma() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "teachers.create",
        json!({
            "nama": "Hendra, S.Pd.",
            "nip": "198505052010011005",
            "mataPelajaran": "Biologi, , IPA Terpadu",
            "email": "hendra@sekolah.id",
            "telepon": "081122334499"
        }),
    );
    assert_eq!(created["teacher"]["mataPelajaran"], json!(["Biologi", "IPA Terpadu"]));
    assert_eq!(
        created["message"].as_str(),
        Some("Data guru \"Hendra, S.Pd.\" berhasil ditambahkan.")
    );
    let id = created["teacher"]["id"].as_str().expect("id").to_string();

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "teachers.update",
        json!({
            "id": id,
            "nama": "Hendra, S.Pd.",
            "nip": "198505052010011005",
            "mataPelajaran": ["Biologi"],
            "email": "hendra@sekolah.id",
            "telepon": "081122334499"
        }),
    );
    assert_eq!(updated["teacher"]["mataPelajaran"], json!(["Biologi"]));

    let search = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "teachers.list",
        json!({ "search": "hendra" }),
    );
    assert_eq!(search["teachers"].as_array().map(|v| v.len()), Some(1));

    let missing = request(
        &mut stdin,
        &mut reader,
        "4",
        "teachers.update",
        json!({
            "id": "g-missing",
            "nama": "X",
            "nip": "1",
            "mataPelajaran": "SKI",
            "email": "x@sekolah.id",
            "telepon": "0800"
        }),
    );
    assert_eq!(error_code(&missing), Some("not_found"));

    let deleted = request_ok(&mut stdin, &mut reader, "5", "teachers.delete", json!({ "id": "g-missing" }));
    assert_eq!(deleted["deleted"].as_bool(), Some(false));
}

#[test]
fn teachers_search_matches_subjects_case_insensitively() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let found = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "teachers.list",
        json!({ "search": "fisika" }),
    );
    let names: Vec<&str> = found["teachers"]
        .as_array()
        .expect("teachers")
        .iter()
        .filter_map(|t| t["nama"].as_str())
        .collect();
    assert_eq!(names, vec!["Dr. H. Agus Salim"]);

    let by_nip = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "teachers.list",
        json!({ "search": "19750202" }),
    );
    assert_eq!(by_nip["teachers"][0]["nama"].as_str(), Some("Dra. Siti Aminah"));

    let all = request_ok(&mut stdin, &mut reader, "3", "teachers.list", json!({ "search": "" }));
    assert_eq!(all["teachers"].as_array().map(|v| v.len()), Some(4));
}

#[test]
fn teachers_create_requires_subjects_and_contact() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let no_subjects = request(
        &mut stdin,
        &mut reader,
        "1",
        "teachers.create",
        json!({
            "nama": "Indra",
            "nip": "199001012015011001",
            "mataPelajaran": " , ",
            "email": "indra@sekolah.id",
            "telepon": "0800"
        }),
    );
    assert_eq!(error_code(&no_subjects), Some("bad_params"));

    let no_email = request(
        &mut stdin,
        &mut reader,
        "2",
        "teachers.create",
        json!({
            "nama": "Indra",
            "nip": "199001012015011001",
            "mataPelajaran": "Seni Budaya",
            "telepon": "0800"
        }),
    );
    assert_eq!(error_code(&no_email), Some("bad_params"));

    let list = request_ok(&mut stdin, &mut reader, "3", "teachers.list", json!({}));
    assert_eq!(list["total"].as_u64(), Some(4));
}
