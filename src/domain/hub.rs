//! Hubs and dashboard modules

pub const HUBS: [&str; 7] = [
    "Madrid Puerta Toledo",
    "Hub Dibecesa",
    "Hub Cadiz",
    "Hub Cordoba",
    "Hub caceres",
    "Hub Vitoria",
    "Hub Cartagena",
];

pub fn default_hub() -> String {
    HUBS[0].to_string()
}

/// Map centre for a hub, `(lat, lng)`. Unknown hubs fall back to central Madrid.
pub fn hub_center(hub: &str) -> (f64, f64) {
    match hub {
        "Madrid Puerta Toledo" => (40.4055, -3.711),
        "Hub Cordoba" => (37.8882, -4.7794),
        "Hub Cadiz" => (36.5298, -6.2926),
        "Hub caceres" => (39.4765, -6.3722),
        "Hub Vitoria" => (42.8467, -2.6716),
        "Hub Cartagena" => (37.6257, -0.9966),
        "Hub Dibecesa" => (40.3432, -3.7637),
        _ => (40.4168, -3.7038),
    }
}

/// Dashboard sections, in the order the module grid shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Asistencias,
    Liquidaciones,
    Flota,
    Incidencias,
    Reparto,
    Compras,
    KilosLitros,
    Contactos,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Asistencias,
        Section::Liquidaciones,
        Section::Flota,
        Section::Incidencias,
        Section::Reparto,
        Section::Compras,
        Section::KilosLitros,
        Section::Contactos,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Asistencias => "asistencias",
            Section::Liquidaciones => "liquidaciones",
            Section::Flota => "flota",
            Section::Incidencias => "incidencias",
            Section::Reparto => "reparto",
            Section::Compras => "compras",
            Section::KilosLitros => "kiloslitros",
            Section::Contactos => "contactos",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Asistencias => "Asistencias",
            Section::Liquidaciones => "Liquidaciones",
            Section::Flota => "Flota",
            Section::Incidencias => "Historico de Incidencias",
            Section::Reparto => "Reparto",
            Section::Compras => "Compras",
            Section::KilosLitros => "Kilos/Litros",
            Section::Contactos => "Contactos",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Section::Asistencias => "Registro y consulta",
            Section::Liquidaciones => "Pagos y cierres",
            Section::Flota => "Vehículos y estado",
            Section::Incidencias => "Flota",
            Section::Reparto => "Rutas y entregas",
            Section::Compras => "Solicitudes y pedidos",
            Section::KilosLitros => "Registro de consumos",
            Section::Contactos => "Lista de contactos",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_round_trip() {
        for s in Section::ALL {
            assert_eq!(Section::from_key(s.key()), Some(s));
        }
        assert_eq!(Section::from_key("nomina"), None);
    }

    #[test]
    fn test_hub_center_fallback() {
        assert_eq!(hub_center("Hub Cadiz"), (36.5298, -6.2926));
        assert_eq!(hub_center("Hub Lugo"), (40.4168, -3.7038));
        assert!(HUBS.iter().all(|h| hub_center(h) != (40.4168, -3.7038)));
    }
}
