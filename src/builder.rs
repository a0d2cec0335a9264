//! Entry point: resolve the mapping, validate it against the chart kind,
//! then hand off to the kind's transform.

use crate::coerce::non_numeric_count;
use crate::data::Dataset;
use crate::error::ChartError;
use crate::ir::ChartResult;
use crate::kind::ChartKind;
use crate::mapping::{AxisMapping, RawMapping};
use crate::resolve::resolve_mapping;
use crate::transform::{spec_for, BuildContext, KindSpec};
use crate::ChartOptions;
use anyhow::anyhow;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Build a chart from a raw, possibly synonym-keyed mapping.
///
/// Always returns a result; failures are reported as `ChartResult::Error`.
pub fn build(
    data: &Dataset,
    kind: ChartKind,
    mapping: &RawMapping,
    options: &ChartOptions,
) -> ChartResult {
    build_resolved(data, kind, &resolve_mapping(mapping), options)
}

/// Build a chart from an already canonical mapping.
pub fn build_resolved(
    data: &Dataset,
    kind: ChartKind,
    mapping: &AxisMapping,
    options: &ChartOptions,
) -> ChartResult {
    match try_build(data, kind, mapping, options) {
        Ok(result) => result,
        Err(err) => err.into(),
    }
}

fn try_build(
    data: &Dataset,
    kind: ChartKind,
    mapping: &AxisMapping,
    options: &ChartOptions,
) -> Result<ChartResult, ChartError> {
    let spec = spec_for(kind);
    let effective = validate(spec, data, mapping)?;

    if data.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    if options.strict_numeric {
        check_numeric(spec, data, &effective)?;
    }

    log::debug!(
        "building {} from {} rows with roles [{}]",
        kind,
        data.len(),
        effective
            .roles()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let ctx = BuildContext {
        data,
        mapping: &effective,
        options,
        kind,
    };
    run_guarded(spec, &ctx)
}

/// Run the kind's transform. Errors and panics both come back as
/// `ChartError::Transform`; the cause is logged, not surfaced.
fn run_guarded(spec: &KindSpec, ctx: &BuildContext<'_>) -> Result<ChartResult, ChartError> {
    let outcome = catch_unwind(AssertUnwindSafe(|| (spec.build)(ctx)))
        .unwrap_or_else(|payload| Err(anyhow!("builder panicked: {}", panic_message(&*payload))));

    outcome.map_err(|cause| {
        log::error!("{} transform failed: {:#}", ctx.kind, cause);
        ChartError::Transform(cause)
    })
}

/// Check the kind's role table against the mapping and the dataset's
/// columns. Returns the mapping restricted to the roles the kind reads.
pub fn validate(
    spec: &KindSpec,
    data: &Dataset,
    mapping: &AxisMapping,
) -> Result<AxisMapping, ChartError> {
    let mut effective = AxisMapping::new();

    for &role in spec.required {
        let columns = mapping.columns(role);
        if columns.is_empty() {
            return Err(ChartError::MissingRole { role });
        }
        if let Some(missing) = columns.iter().find(|c| !data.has_column(c)) {
            log::warn!("{} is mapped to missing column '{}'", role, missing);
            return Err(ChartError::UnknownColumn {
                role,
                column: missing.clone(),
            });
        }
        effective.bind(role, columns.to_vec());
    }

    for &role in spec.optional {
        let columns = mapping.columns(role);
        if columns.is_empty() {
            continue;
        }
        if let Some(missing) = columns.iter().find(|c| !data.has_column(c)) {
            log::warn!("ignoring {} mapping: column '{}' not found", role, missing);
            continue;
        }
        effective.bind(role, columns.to_vec());
    }

    for role in mapping.roles().filter(|r| !effective.is_bound(*r)) {
        if !spec.optional.contains(&role) {
            log::debug!("{} does not use the {} role", spec.kind, role);
        }
    }

    Ok(effective)
}

fn check_numeric(spec: &KindSpec, data: &Dataset, mapping: &AxisMapping) -> Result<(), ChartError> {
    for &role in spec.numeric {
        for column in mapping.columns(role) {
            let count = non_numeric_count(data, column);
            if count > 0 {
                log::warn!("{} rows had non-numeric values in column {}", count, column);
                return Err(ChartError::NonNumeric {
                    column: column.clone(),
                    count,
                });
            }
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
