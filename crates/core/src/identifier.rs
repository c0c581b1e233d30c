use once_cell::sync::Lazy;
use regex::Regex;

static EXTERNAL_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^external(?:\s+[A-Za-z0-9_-]+)?\s+"(.+)"$"#).expect("valid external pattern")
});

const NODE_MODULES: &str = "node_modules/";

/// Classification of a module identifier.
///
/// Resolved modules carry their path, externals look like
/// `external "<request>"` (webpack 4) or `external <type> "<request>"`
/// (webpack 5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleIdentifier<'a> {
    /// Left out of the bundle; carries the raw import request
    External { request: &'a str },
    /// Bundled (or anything that does not match the external grammar)
    Internal,
}

impl ModuleIdentifier<'_> {
    pub fn is_external(&self) -> bool {
        matches!(self, ModuleIdentifier::External { .. })
    }
}

/// An import request split into its installable package and sub-path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest<'a> {
    pub package_name: &'a str,
    pub sub_path: Option<&'a str>,
}

/// Classify a raw module identifier. Never fails.
pub fn parse_module_identifier(identifier: &str) -> ModuleIdentifier<'_> {
    EXTERNAL_IDENTIFIER
        .captures(identifier.trim())
        .and_then(|caps| caps.get(1))
        .map_or(ModuleIdentifier::Internal, |m| ModuleIdentifier::External {
            request: m.as_str(),
        })
}

/// Split a request into package name and sub-path.
///
/// `@scope/name/sub` keeps two segments, everything else keeps one.
/// Returns `None` for requests that cannot name a package (empty, `@scope`
/// without a name, leading slash).
pub fn split_request(request: &str) -> Option<PackageRequest<'_>> {
    let segments = if request.starts_with('@') { 2 } else { 1 };

    let mut end = 0;
    for index in 0..segments {
        let rest = &request[end..];
        let segment_len = rest.find('/').unwrap_or(rest.len());
        if segment_len == 0 || (index == 0 && segments == 2 && segment_len == 1) {
            return None;
        }
        end += segment_len;
        if index + 1 < segments {
            if end == request.len() {
                return None;
            }
            end += 1;
        }
    }

    let sub_path = request[end..]
        .strip_prefix('/')
        .filter(|sub| !sub.is_empty());

    Some(PackageRequest {
        package_name: &request[..end],
        sub_path,
    })
}

/// Package name of a request, with any sub-path discarded
pub fn package_name_of(request: &str) -> Option<&str> {
    split_request(request).map(|req| req.package_name)
}

/// Resource part of a resolved identifier: loaders before the last `!` and
/// any `?query` are dropped, as are surrounding quotes.
pub fn resource_path(identifier: &str) -> &str {
    let resource = identifier.trim().trim_matches('"');
    let resource = resource.rsplit('!').next().unwrap_or(resource);
    resource.split('?').next().unwrap_or(resource)
}

/// Package owning a resolved module, taken from the last `node_modules/`
/// segment of its resource path. First-party paths yield `None`.
pub fn package_from_path(path: &str) -> Option<String> {
    let normalized = resource_path(path).replace('\\', "/");
    let start = normalized.rfind(NODE_MODULES)? + NODE_MODULES.len();
    package_name_of(&normalized[start..]).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_identifier() {
        assert_eq!(
            parse_module_identifier(r#"external "bluebird""#),
            ModuleIdentifier::External { request: "bluebird" }
        );
        assert_eq!(
            parse_module_identifier(r#"external "@scoped/vendor/module2""#),
            ModuleIdentifier::External {
                request: "@scoped/vendor/module2"
            }
        );
    }

    #[test]
    fn test_typed_external_identifier() {
        assert_eq!(
            parse_module_identifier(r#"external commonjs "uuid/v4""#),
            ModuleIdentifier::External { request: "uuid/v4" }
        );
        assert_eq!(
            parse_module_identifier(r#"external node-commonjs "fs""#),
            ModuleIdentifier::External { request: "fs" }
        );
    }

    #[test]
    fn test_internal_identifiers() {
        for identifier in [
            r#""crypto""#,
            r#""uuid/v4""#,
            r#""@scoped/vendor/module1""#,
            "/project/src/handler.js",
            "external",
            r#"external """#,
            r#"externals "lodash""#,
            r#"multi "./a" "./b""#,
            "",
        ] {
            assert!(
                !parse_module_identifier(identifier).is_external(),
                "{identifier} should be internal"
            );
        }
    }

    #[test]
    fn test_split_plain_request() {
        assert_eq!(
            split_request("bluebird"),
            Some(PackageRequest {
                package_name: "bluebird",
                sub_path: None
            })
        );
        assert_eq!(
            split_request("uuid/v4"),
            Some(PackageRequest {
                package_name: "uuid",
                sub_path: Some("v4")
            })
        );
    }

    #[test]
    fn test_split_scoped_request() {
        assert_eq!(
            split_request("@scoped/vendor/module2"),
            Some(PackageRequest {
                package_name: "@scoped/vendor",
                sub_path: Some("module2")
            })
        );
        assert_eq!(
            split_request("@aws-sdk/client-s3/dist/index.js"),
            Some(PackageRequest {
                package_name: "@aws-sdk/client-s3",
                sub_path: Some("dist/index.js")
            })
        );
        assert_eq!(package_name_of("@types/node"), Some("@types/node"));
    }

    #[test]
    fn test_split_degenerate_requests() {
        assert_eq!(split_request(""), None);
        assert_eq!(split_request("@scope"), None);
        assert_eq!(split_request("@scope/"), None);
        assert_eq!(split_request("@/name"), None);
        assert_eq!(split_request("/absolute/path"), None);
        assert_eq!(package_name_of("lodash/"), Some("lodash"));
    }

    #[test]
    fn test_package_from_path() {
        assert_eq!(
            package_from_path("/app/node_modules/request-promise/lib/rp.js"),
            Some("request-promise".to_string())
        );
        assert_eq!(
            package_from_path("/app/node_modules/a/node_modules/@scope/b/index.js"),
            Some("@scope/b".to_string())
        );
        assert_eq!(
            package_from_path(r"C:\app\node_modules\bluebird\js\release\bluebird.js"),
            Some("bluebird".to_string())
        );
        assert_eq!(package_from_path("/app/src/handler.js"), None);
    }

    #[test]
    fn test_resource_path_strips_loaders() {
        assert_eq!(
            resource_path("/app/node_modules/babel-loader/lib/index.js??ref--4!/app/src/handler.js"),
            "/app/src/handler.js"
        );
        assert_eq!(
            resource_path("\"/app/node_modules/ts-loader/index.js!/app/src/a.ts?inline\""),
            "/app/src/a.ts"
        );
        assert_eq!(resource_path("/app/src/b.js"), "/app/src/b.js");
        assert_eq!(
            package_from_path(
                "/app/node_modules/babel-loader/lib/index.js??ref--4!/app/src/handler.js"
            ),
            None
        );
    }
}
