//! Projection of raw cluster objects into display records.
//!
//! Every function here is pure: the same input object always yields the same
//! record. Missing optional fields never fail, they fall back to zero, false
//! or an empty string.

use common::image;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::CronJob;
use k8s_openapi::api::core::v1::{Container, Namespace, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use std::collections::BTreeMap;

/// Timestamps are rendered in UTC with this layout
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_time(time: &Time) -> String {
    time.0.format(TIMESTAMP_FORMAT).to_string()
}

fn name(meta: &ObjectMeta) -> String {
    meta.name.clone().unwrap_or_default()
}

fn namespace_of(meta: &ObjectMeta) -> String {
    meta.namespace.clone().unwrap_or_default()
}

fn labels(meta: &ObjectMeta) -> BTreeMap<String, String> {
    meta.labels.clone().unwrap_or_default()
}

fn age(meta: &ObjectMeta) -> String {
    meta.creation_timestamp
        .as_ref()
        .map(format_time)
        .unwrap_or_default()
}

fn containers(template: &PodTemplateSpec) -> &[Container] {
    template
        .spec
        .as_ref()
        .map(|spec| spec.containers.as_slice())
        .unwrap_or_default()
}

fn image_ref(container: &Container) -> &str {
    container.image.as_deref().unwrap_or_default()
}

/// Short image names, one per container, in declaration order
pub fn images(containers: &[Container]) -> Vec<String> {
    containers
        .iter()
        .map(|c| image::short_name(image_ref(c)).to_string())
        .collect()
}

/// Version of the first container's image; empty without containers
pub fn version(containers: &[Container]) -> String {
    containers
        .first()
        .map(|c| image::version(image_ref(c)).to_string())
        .unwrap_or_default()
}

pub fn namespace(ns: &Namespace) -> common::Namespace {
    common::Namespace {
        name: name(&ns.metadata),
        status: ns
            .status
            .as_ref()
            .and_then(|status| status.phase.clone())
            .unwrap_or_default(),
        labels: labels(&ns.metadata),
        age: age(&ns.metadata),
    }
}

pub fn deployment(deploy: &Deployment) -> common::Deployment {
    let spec = deploy.spec.as_ref();
    let status = deploy.status.as_ref();
    let containers = spec.map(|s| containers(&s.template)).unwrap_or_default();

    common::Deployment {
        name: name(&deploy.metadata),
        namespace: namespace_of(&deploy.metadata),
        replicas: spec.and_then(|s| s.replicas).unwrap_or(0),
        ready: status.and_then(|s| s.ready_replicas).unwrap_or(0),
        available: status.and_then(|s| s.available_replicas).unwrap_or(0),
        labels: labels(&deploy.metadata),
        age: age(&deploy.metadata),
        images: images(containers),
        version: version(containers),
    }
}

pub fn cron_job(cj: &CronJob) -> common::CronJob {
    let spec = cj.spec.as_ref();
    let status = cj.status.as_ref();
    let containers = spec
        .and_then(|s| s.job_template.spec.as_ref())
        .map(|job| containers(&job.template))
        .unwrap_or_default();

    common::CronJob {
        name: name(&cj.metadata),
        namespace: namespace_of(&cj.metadata),
        schedule: spec.map(|s| s.schedule.clone()).unwrap_or_default(),
        suspend: spec.and_then(|s| s.suspend).unwrap_or(false),
        active: status
            .and_then(|s| s.active.as_ref())
            .map_or(0, Vec::len),
        last_run: status
            .and_then(|s| s.last_schedule_time.as_ref())
            .map(format_time)
            .unwrap_or_default(),
        labels: labels(&cj.metadata),
        age: age(&cj.metadata),
        images: images(containers),
        version: version(containers),
    }
}

pub fn stateful_set(sts: &StatefulSet) -> common::StatefulSet {
    let spec = sts.spec.as_ref();
    let containers = spec.map(|s| containers(&s.template)).unwrap_or_default();

    common::StatefulSet {
        name: name(&sts.metadata),
        namespace: namespace_of(&sts.metadata),
        replicas: spec.and_then(|s| s.replicas).unwrap_or(0),
        ready: sts
            .status
            .as_ref()
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0),
        labels: labels(&sts.metadata),
        age: age(&sts.metadata),
        images: images(containers),
        version: version(containers),
    }
}
