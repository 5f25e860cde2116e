//! Cluster, load balancer, CDN and network inventory

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::templates::{CLUSTER_SERVICE_NAMES, POD_NAMES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSnapshot {
    pub kubernetes: KubernetesStatus,
    pub load_balancers: Vec<LoadBalancer>,
    pub cdn: CdnStatus,
    pub networking: Networking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesStatus {
    pub cluster: ClusterInfo,
    pub namespaces: Vec<NamespaceInfo>,
    pub pods: Vec<PodDeployment>,
    pub services: Vec<ClusterService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub name: String,
    pub version: String,
    pub nodes: u32,
    pub status: String,
    pub uptime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
    pub pods: u32,
    pub services: u32,
    pub deployments: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodDeployment {
    pub id: String,
    pub name: String,
    pub namespace: String,
    pub status: String,
    pub replicas: ReplicaCounts,
    pub resources: PodResources,
    pub restarts: u32,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaCounts {
    pub desired: u32,
    pub ready: u32,
    pub available: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodResources {
    pub cpu: ResourceUsage,
    pub memory: ResourceUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub request: String,
    pub limit: String,
    pub usage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterService {
    pub id: String,
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(rename = "clusterIP")]
    pub cluster_ip: String,
    pub ports: Vec<ServicePort>,
    pub endpoints: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    pub name: String,
    pub port: u16,
    pub target_port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(rename = "type")]
    pub lb_type: String,
    pub targets: TargetCounts,
    pub metrics: LoadBalancerMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCounts {
    pub healthy: u32,
    pub unhealthy: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerMetrics {
    pub requests: f64,
    pub latency: f64,
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdnStatus {
    pub provider: String,
    pub status: String,
    pub metrics: CdnMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdnMetrics {
    pub requests: f64,
    pub bandwidth: String,
    pub cache_hit_rate: f64,
    pub edge_locations: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Networking {
    pub vpc: VpcInfo,
    pub security: SecurityPosture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcInfo {
    pub id: String,
    pub cidr: String,
    pub subnets: u32,
    pub route_tables: u32,
    pub internet_gateways: u32,
    pub nat_gateways: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPosture {
    pub security_groups: u32,
    pub nacls: u32,
    pub waf_rules: u32,
    pub ddos_protection: bool,
}

pub fn generate_infrastructure_snapshot<R: Rng + ?Sized>(rng: &mut R) -> InfrastructureSnapshot {
    InfrastructureSnapshot {
        kubernetes: KubernetesStatus {
            cluster: ClusterInfo {
                name: "production-cluster".to_string(),
                version: "1.28.2".to_string(),
                nodes: 12,
                status: "healthy".to_string(),
                uptime: "99.9%".to_string(),
            },
            namespaces: vec![
                namespace("default", 24, 8, 6),
                namespace("monitoring", 12, 4, 3),
                namespace("ingress-nginx", 3, 2, 1),
            ],
            pods: generate_pods(rng),
            services: generate_cluster_services(rng),
        },
        load_balancers: vec![LoadBalancer {
            id: "lb-01".to_string(),
            name: "Main Load Balancer".to_string(),
            status: "healthy".to_string(),
            lb_type: "Application Load Balancer".to_string(),
            targets: TargetCounts {
                healthy: 8,
                unhealthy: 0,
                total: 8,
            },
            metrics: LoadBalancerMetrics {
                requests: 15000.0 + rng.gen::<f64>() * 5000.0,
                latency: 50.0 + rng.gen::<f64>() * 30.0,
                error_rate: rng.gen::<f64>() * 2.0,
            },
        }],
        cdn: CdnStatus {
            provider: "CloudFlare".to_string(),
            status: "healthy".to_string(),
            metrics: CdnMetrics {
                requests: 50000.0 + rng.gen::<f64>() * 20000.0,
                bandwidth: "2.5 TB".to_string(),
                cache_hit_rate: 85.0 + rng.gen::<f64>() * 10.0,
                edge_locations: 200,
            },
        },
        networking: Networking {
            vpc: VpcInfo {
                id: "vpc-12345".to_string(),
                cidr: "10.0.0.0/16".to_string(),
                subnets: 6,
                route_tables: 3,
                internet_gateways: 1,
                nat_gateways: 2,
            },
            security: SecurityPosture {
                security_groups: 15,
                nacls: 3,
                waf_rules: 25,
                ddos_protection: true,
            },
        },
    }
}

fn namespace(name: &str, pods: u32, services: u32, deployments: u32) -> NamespaceInfo {
    NamespaceInfo {
        name: name.to_string(),
        pods,
        services,
        deployments,
        status: "healthy".to_string(),
    }
}

fn generate_pods<R: Rng + ?Sized>(rng: &mut R) -> Vec<PodDeployment> {
    POD_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let desired: u32 = rng.gen_range(2..=4);
            // Can overshoot `desired`; such a deployment reports Pending.
            let ready = rng.gen_range(0..desired) + desired * 4 / 5;

            PodDeployment {
                id: format!("pod-{}", index),
                name: format!("{}-deployment", name),
                namespace: "default".to_string(),
                status: if ready == desired { "Running" } else { "Pending" }.to_string(),
                replicas: ReplicaCounts {
                    desired,
                    ready,
                    available: ready,
                },
                resources: PodResources {
                    cpu: ResourceUsage {
                        request: "100m".to_string(),
                        limit: "500m".to_string(),
                        usage: rng.gen_range(0..400) + 50,
                    },
                    memory: ResourceUsage {
                        request: "128Mi".to_string(),
                        limit: "512Mi".to_string(),
                        usage: rng.gen_range(0..400) + 100,
                    },
                },
                restarts: rng.gen_range(0..5),
                age: format!("{}d", rng.gen_range(1..=30)),
            }
        })
        .collect()
}

fn generate_cluster_services<R: Rng + ?Sized>(rng: &mut R) -> Vec<ClusterService> {
    CLUSTER_SERVICE_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| ClusterService {
            id: format!("svc-{}", index),
            name: name.to_string(),
            namespace: "default".to_string(),
            service_type: "ClusterIP".to_string(),
            cluster_ip: format!("10.0.{}.{}", rng.gen_range(0..255), rng.gen_range(0..255)),
            ports: vec![ServicePort {
                name: "http".to_string(),
                port: 80,
                target_port: 8080,
                protocol: "TCP".to_string(),
            }],
            endpoints: rng.gen_range(2..=5),
            status: "Active".to_string(),
        })
        .collect()
}
