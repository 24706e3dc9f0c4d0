//! Document-level checks that need no API model.

use std::collections::HashSet;

use super::{ConfigProto, InterfaceConfigProto, MethodConfigProto};
use crate::{Result, error::SourceContext};

pub(crate) fn validate_config(config: &ConfigProto, ctx: &SourceContext) -> Result<()> {
    for (language, settings) in &config.language_settings {
        if settings.package_name.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("language_settings.{} has an empty package_name", language),
                Some(language.as_str()),
            ));
        }
    }

    let mut seen = HashSet::new();
    for interface in &config.interfaces {
        if interface.name.trim().is_empty() {
            return Err(ctx.validation_error("interface entry without a name", None));
        }
        if !seen.insert(interface.name.as_str()) {
            return Err(ctx.duplicate_error("interface", &interface.name, "interfaces"));
        }
        validate_interface(interface, ctx)?;
    }
    Ok(())
}

fn validate_interface(interface: &InterfaceConfigProto, ctx: &SourceContext) -> Result<()> {
    let context = format!("interface '{}'", interface.name);

    unique(
        interface.retry_codes_def.iter().map(|d| d.name.as_str()),
        "retry codes definition",
        &context,
        ctx,
    )?;
    unique(
        interface.retry_params_def.iter().map(|d| d.name.as_str()),
        "retry params definition",
        &context,
        ctx,
    )?;
    unique(
        interface.methods.iter().map(|m| m.name.as_str()),
        "method",
        &context,
        ctx,
    )?;

    for method in &interface.methods {
        validate_method(method, &context, ctx)?;
    }
    Ok(())
}

fn validate_method(method: &MethodConfigProto, interface: &str, ctx: &SourceContext) -> Result<()> {
    if method.name.trim().is_empty() {
        return Err(ctx.validation_error(format!("method entry without a name in {}", interface), None));
    }
    let context = format!("method '{}' of {}", method.name, interface);

    if let Some(paging) = &method.page_streaming
        && (paging.request.token_field.is_empty()
            || paging.response.token_field.is_empty()
            || paging.response.resources_field.is_empty())
    {
        return Err(ctx.validation_error(
            format!("page_streaming of {} needs token and resources fields", context),
            Some(&method.name),
        ));
    }

    if let Some(flattening) = &method.flattening
        && flattening.groups.iter().any(|g| g.parameters.is_empty())
    {
        return Err(ctx.validation_error(
            format!("flattening group without parameters in {}", context),
            Some(&method.name),
        ));
    }

    if let Some(batching) = &method.batching
        && batching.batch_descriptor.batched_field.is_empty()
    {
        return Err(ctx.validation_error(
            format!("batch_descriptor of {} needs a batched_field", context),
            Some(&method.name),
        ));
    }

    unique(
        method.samples.iter().map(|s| s.id.as_str()),
        "sample",
        &context,
        ctx,
    )
}

fn unique<'a>(
    names: impl IntoIterator<Item = &'a str>,
    kind: &'static str,
    context: &str,
    ctx: &SourceContext,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ctx.duplicate_error(kind, name, context));
        }
    }
    Ok(())
}
