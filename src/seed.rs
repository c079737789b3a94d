use crate::directory::{Student, Teacher};

#[allow(clippy::too_many_arguments)]
fn student(
    id: &str,
    nama: &str,
    nis: &str,
    nisn: &str,
    kelas: &str,
    alamat: &str,
    telepon: &str,
    nama_wali: &str,
    tanggal_lulus: Option<&str>,
) -> Student {
    Student {
        id: id.to_string(),
        nama: nama.to_string(),
        nis: nis.to_string(),
        nisn: nisn.to_string(),
        kelas: kelas.to_string(),
        foto: format!("https://i.pravatar.cc/150?u={}", id),
        alamat: alamat.to_string(),
        telepon: telepon.to_string(),
        nama_wali: nama_wali.to_string(),
        tanggal_lulus: tanggal_lulus.map(str::to_string),
    }
}

fn teacher(id: &str, nama: &str, nip: &str, subjects: &[&str], email: &str, telepon: &str) -> Teacher {
    Teacher {
        id: id.to_string(),
        nama: nama.to_string(),
        nip: nip.to_string(),
        mata_pelajaran: subjects.iter().map(|s| s.to_string()).collect(),
        foto: format!("https://i.pravatar.cc/150?u={}", id),
        email: email.to_string(),
        telepon: telepon.to_string(),
    }
}

pub fn students() -> Vec<Student> {
    vec![
        student(
            "s1",
            "Ahmad Abdullah",
            "12345",
            "0012345678",
            "IX A",
            "Jl. Merdeka No. 1",
            "081234567890",
            "Budi Abdullah",
            None,
        ),
        student(
            "s2",
            "Budi Santoso",
            "12346",
            "0023456789",
            "IX B",
            "Jl. Pahlawan No. 2",
            "081234567891",
            "Joko Santoso",
            None,
        ),
        student(
            "s3",
            "Citra Lestari",
            "12347",
            "0034567890",
            "VIII A",
            "Jl. Sudirman No. 3",
            "081234567892",
            "Dewi Lestari",
            Some("2023-06-10"),
        ),
        student(
            "s4",
            "Dewi Anggraini",
            "12348",
            "0045678901",
            "VII C",
            "Jl. Gatot Subroto No. 4",
            "081234567893",
            "Eko Anggraini",
            None,
        ),
    ]
}

pub fn teachers() -> Vec<Teacher> {
    vec![
        teacher(
            "g1",
            "Dr. H. Agus Salim",
            "197001012000011001",
            &["Matematika", "Fisika"],
            "agus.salim@sekolah.id",
            "081122334455",
        ),
        teacher(
            "g2",
            "Dra. Siti Aminah",
            "197502022001022002",
            &["Bahasa Indonesia"],
            "siti.aminah@sekolah.id",
            "081122334466",
        ),
        teacher(
            "g3",
            "Bambang Pamungkas, S.Pd.",
            "198003032005031003",
            &["Pendidikan Jasmani"],
            "bambang.p@sekolah.id",
            "081122334477",
        ),
        teacher(
            "g4",
            "Sri Mulyani, S.Ag.",
            "197804042003042004",
            &["Pendidikan Agama Islam", "SKI"],
            "sri.mulyani@sekolah.id",
            "081122334488",
        ),
    ]
}
