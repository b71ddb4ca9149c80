//! Static career catalogue offered in the inscription form.

/// Careers a member can declare, as shown by the form dropdown.
pub const CAREERS: &[&str] = &[
    "Bioingeniería",
    "Ingeniería Civil",
    "Ingeniería Electrónica",
    "Ingeniería Industrial",
    "Ingeniería Informática",
    "Ingeniería Mecánica",
    "Ingeniería Naval",
    "Ingeniería Química",
    "Ingeniería en Petróleo",
    "Licenciatura en Administración y Sistemas",
    "Licenciatura en Analítica Empresarial y Social",
];

pub fn is_valid(name: &str) -> bool {
    CAREERS.contains(&name)
}

/// Case-insensitive substring search over the catalogue, the dropdown filter.
pub fn matching(search: &str) -> Vec<&'static str> {
    let needle = search.to_lowercase();

    CAREERS
        .iter()
        .copied()
        .filter(|career| career.to_lowercase().contains(&needle))
        .collect()
}
