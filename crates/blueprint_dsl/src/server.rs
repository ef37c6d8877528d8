//! Servers, hosts and URI variables.

use blueprint_expr::{ExprKind, HostExpr, ServerExpr};

use crate::args::{IntoArgs, args_invalid, parse_attribute_args};
use crate::attribute::build_attribute;
use crate::opt::{Opt, apply_within, first_invalid, incompatible, misplaced};

/// Declares a server of the API or of a service.
pub fn server(name: impl Into<String>, opts: Vec<Opt>) -> Opt {
    let name = name.into();
    let invalid = first_invalid(&opts);
    Opt::new("server", move |target, reporter| {
        if target.servers_mut().is_none() {
            return misplaced("server", &opts, target, reporter);
        }
        let mut server = ServerExpr::new(name);
        apply_within(ExprKind::Server.frame(&server.name), opts, &mut server, reporter)?;
        if let Some(servers) = target.servers_mut() {
            servers.push(server);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Lists the services hosted by a server.
pub fn services<I, S>(names: I) -> Opt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    Opt::new("services", move |target, reporter| {
        match target.server_mut() {
            Some(server) => {
                for name in names {
                    if !server.services.contains(&name) {
                        server.services.push(name);
                    }
                }
            }
            None => incompatible("services", target, reporter),
        }
        Ok(())
    })
}

/// Declares a host of a server.
pub fn host(name: impl Into<String>, opts: Vec<Opt>) -> Opt {
    let name = name.into();
    let invalid = first_invalid(&opts);
    Opt::new("host", move |target, reporter| {
        if target.server_mut().is_none() {
            return misplaced("host", &opts, target, reporter);
        }
        let mut host = HostExpr::new(name);
        apply_within(ExprKind::Host.frame(&host.name), opts, &mut host, reporter)?;
        if let Some(server) = target.server_mut() {
            server.hosts.push(host);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Adds a URI template, possibly with `{param}` placeholders, to a host.
pub fn uri(template: impl Into<String>) -> Opt {
    let template = template.into();
    Opt::new("uri", move |target, reporter| {
        match target.host_mut() {
            Some(host) => host.uris.push(template),
            None => incompatible("uri", target, reporter),
        }
        Ok(())
    })
}

/// Declares a URI variable of a host. Takes the attribute argument shapes;
/// the variable needs a default or an enumeration.
pub fn variable(name: impl Into<String>, args: impl IntoArgs) -> Opt {
    let name = name.into();
    let parsed = parse_attribute_args("variable", args.into_args());
    let invalid = args_invalid(&parsed);
    Opt::new("variable", move |target, reporter| {
        let parsed = parsed?;
        if target.host_mut().is_none() {
            return misplaced("variable", &parsed.dsl, target, reporter);
        }
        let frame = ExprKind::Attribute.frame(&name);
        let attr = reporter.within(frame, |r| build_attribute(parsed, true, r))?;
        if let Some(host) = target.host_mut() {
            host.variables.push_field(name, attr);
        }
        Ok(())
    })
    .guarded_by(invalid)
}
