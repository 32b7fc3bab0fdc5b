use crate::types::{Service, ServiceCategory};
use std::sync::Arc;

/// The services on offer. Fixed at deploy time; built once in `main` and
/// passed into the engine explicitly so tests never need ambient state.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Arc<Vec<Service>>,
}

impl ServiceCatalog {
    pub fn builtin() -> Self {
        Self::new(builtin_services())
    }

    pub fn new(services: Vec<Service>) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }
}

fn builtin_services() -> Vec<Service> {
    vec![
        Service {
            id: "1".into(),
            name: "Lashes | Brazilian mega volume".into(),
            duration_minutes: 240,
            price: 85,
            description: "Full mega-volume lash set, isolation and styling included".into(),
            category: ServiceCategory::Hair,
        },
        Service {
            id: "2".into(),
            name: "Lashes | Brazilian volume".into(),
            duration_minutes: 180,
            price: 65,
            description: "Volume lash set with premium fans".into(),
            category: ServiceCategory::Hair,
        },
        Service {
            id: "3".into(),
            name: "Brows | Henna design".into(),
            duration_minutes: 60,
            price: 38,
            description: "Brow mapping, shaping and henna tint".into(),
            category: ServiceCategory::Nails,
        },
        Service {
            id: "4".into(),
            name: "Brows | Simple design".into(),
            duration_minutes: 30,
            price: 25,
            description: "Brow shaping without tint".into(),
            category: ServiceCategory::Nails,
        },
        Service {
            id: "5".into(),
            name: "Upper lip wax".into(),
            duration_minutes: 30,
            price: 8,
            description: "Quick upper lip waxing".into(),
            category: ServiceCategory::Makeup,
        },
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_services() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.services().len(), 5);
        for service in catalog.services() {
            assert!(service.duration_minutes > 0);
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.get("1").unwrap().duration_minutes, 240);
        assert_eq!(catalog.get("4").unwrap().duration_minutes, 30);
        assert!(catalog.get("99").is_none());
    }
}
