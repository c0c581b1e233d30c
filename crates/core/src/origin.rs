use crate::identifier::{package_from_path, package_name_of, parse_module_identifier, ModuleIdentifier};
use crate::models::ModuleRecord;
use serde::{Deserialize, Serialize};

/// Resolves the package that imported an external module
pub trait OriginResolver: Send + Sync {
    fn resolve(&self, module: &ModuleRecord) -> Option<String>;
}

/// Uses the module's issuer, when the bundler recorded one
#[derive(Debug, Clone, Copy, Default)]
pub struct IssuerOrigin;

impl OriginResolver for IssuerOrigin {
    fn resolve(&self, module: &ModuleRecord) -> Option<String> {
        let issuer = module.issuer.as_deref()?;
        match parse_module_identifier(issuer) {
            ModuleIdentifier::External { request } => package_name_of(request).map(str::to_string),
            ModuleIdentifier::Internal => package_from_path(issuer),
        }
    }
}

/// Never reports an origin
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOrigin;

impl OriginResolver for NoOrigin {
    fn resolve(&self, _module: &ModuleRecord) -> Option<String> {
        None
    }
}

/// Which origin resolver to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginStrategy {
    #[default]
    Issuer,
    None,
}

impl OriginStrategy {
    pub fn resolver(self) -> Box<dyn OriginResolver> {
        match self {
            OriginStrategy::Issuer => Box::new(IssuerOrigin),
            OriginStrategy::None => Box::new(NoOrigin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issuer_absent() {
        let module = ModuleRecord::new(r#"external "uuid/v4""#);
        assert_eq!(IssuerOrigin.resolve(&module), None);
    }

    #[test]
    fn test_issuer_inside_node_modules() {
        let module = ModuleRecord::new(r#"external "bluebird""#)
            .with_issuer("/app/node_modules/request-promise/lib/rp.js");
        assert_eq!(
            IssuerOrigin.resolve(&module),
            Some("request-promise".to_string())
        );
    }

    #[test]
    fn test_issuer_first_party() {
        let module =
            ModuleRecord::new(r#"external "bluebird""#).with_issuer("\"/app/src/handler.js\"");
        assert_eq!(IssuerOrigin.resolve(&module), None);
    }

    #[test]
    fn test_loader_prefixed_first_party_issuer() {
        let module = ModuleRecord::new(r#"external "bluebird""#).with_issuer(
            "/app/node_modules/babel-loader/lib/index.js??ref--4!/app/src/handler.js",
        );
        assert_eq!(IssuerOrigin.resolve(&module), None);
    }

    #[test]
    fn test_loader_prefixed_dependency_issuer() {
        let module = ModuleRecord::new(r#"external "bluebird""#).with_issuer(
            "/app/node_modules/babel-loader/lib/index.js??ref--4!/app/node_modules/@scoped/vendor/lib/a.js?cache",
        );
        assert_eq!(
            IssuerOrigin.resolve(&module),
            Some("@scoped/vendor".to_string())
        );
    }

    #[test]
    fn test_issuer_external() {
        let module = ModuleRecord::new(r#"external "tslib""#)
            .with_issuer(r#"external "@scoped/vendor/module2""#);
        assert_eq!(
            IssuerOrigin.resolve(&module),
            Some("@scoped/vendor".to_string())
        );
    }

    #[test]
    fn test_no_origin() {
        let module = ModuleRecord::new(r#"external "bluebird""#)
            .with_issuer("/app/node_modules/request-promise/lib/rp.js");
        assert_eq!(NoOrigin.resolve(&module), None);
        assert_eq!(OriginStrategy::None.resolver().resolve(&module), None);
    }
}
