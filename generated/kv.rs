#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEntry {
    #[prost(bytes = "vec", tag = "1")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub version: u64,
}
// ------- Write -------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWriteReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWriteResult {
    #[prost(oneof = "proto_write_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_write_result::Result>,
}
/// Nested message and enum types in `ProtoWriteResult`.
pub mod proto_write_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoWriteSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoWriteError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWriteSuccess {
    #[prost(uint64, tag = "1")]
    pub version: u64,
    /// false means the write is only known to be applied on the leader (partial success).
    #[prost(bool, tag = "2")]
    pub quorum_met: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWriteError {
    #[prost(oneof = "proto_write_error::Err", tags = "1")]
    pub err: ::core::option::Option<proto_write_error::Err>,
}
/// Nested message and enum types in `ProtoWriteError`.
pub mod proto_write_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        NotLeader(super::ProtoNotLeader),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNotLeader {}
// ------- Read -------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReadReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReadResult {
    #[prost(oneof = "proto_read_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_read_result::Result>,
}
/// Nested message and enum types in `ProtoReadResult`.
pub mod proto_read_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Found(super::ProtoEntry),
        #[prost(message, tag = "2")]
        NotFound(super::ProtoKeyNotFound),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKeyNotFound {}
// ------- Replicate -------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicateReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "3")]
    pub version: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicateResult {
    #[prost(oneof = "proto_replicate_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_replicate_result::Result>,
}
/// Nested message and enum types in `ProtoReplicateResult`.
pub mod proto_replicate_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoReplicateSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoReplicateError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicateSuccess {
    #[prost(bool, tag = "1")]
    pub updated: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicateError {
    #[prost(oneof = "proto_replicate_error::Err", tags = "1")]
    pub err: ::core::option::Option<proto_replicate_error::Err>,
}
/// Nested message and enum types in `ProtoReplicateError`.
pub mod proto_replicate_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        NotFollower(super::ProtoNotFollower),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNotFollower {}
// ------- Dump -------

/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDumpReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDumpResult {
    #[prost(map = "string, message", tag = "1")]
    pub entries: ::std::collections::HashMap<::prost::alloc::string::String, ProtoEntry>,
}
// ------- Health -------

/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHealthReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHealthResult {
    #[prost(string, tag = "1")]
    pub node_id: ::prost::alloc::string::String,
    #[prost(oneof = "proto_health_result::Role", tags = "2, 3")]
    pub role: ::core::option::Option<proto_health_result::Role>,
}
/// Nested message and enum types in `ProtoHealthResult`.
pub mod proto_health_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Role {
        #[prost(message, tag = "2")]
        Leader(super::ProtoLeaderRole),
        #[prost(message, tag = "3")]
        Follower(super::ProtoFollowerRole),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaderRole {}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFollowerRole {}
#[doc = r" Generated client implementations."]
pub mod grpc_kv_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " One leader accepts writes and fans them out to a fixed set of followers."]
    #[doc = " Every node serves reads, dumps and health checks."]
    pub struct GrpcKvClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcKvClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcKvClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        #[doc = " Leader only."]
        pub async fn write(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoWriteReq>,
        ) -> Result<tonic::Response<super::ProtoWriteResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kv.GrpcKv/Write");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn read(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoReadReq>,
        ) -> Result<tonic::Response<super::ProtoReadResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kv.GrpcKv/Read");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Follower only. Called by the leader."]
        pub async fn replicate(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoReplicateReq>,
        ) -> Result<tonic::Response<super::ProtoReplicateResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kv.GrpcKv/Replicate");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn dump(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDumpReq>,
        ) -> Result<tonic::Response<super::ProtoDumpResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kv.GrpcKv/Dump");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn health(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoHealthReq>,
        ) -> Result<tonic::Response<super::ProtoHealthResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kv.GrpcKv/Health");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcKvClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcKvClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcKvClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_kv_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcKvServer."]
    #[async_trait]
    pub trait GrpcKv: Send + Sync + 'static {
        #[doc = " Leader only."]
        async fn write(
            &self,
            request: tonic::Request<super::ProtoWriteReq>,
        ) -> Result<tonic::Response<super::ProtoWriteResult>, tonic::Status>;
        async fn read(
            &self,
            request: tonic::Request<super::ProtoReadReq>,
        ) -> Result<tonic::Response<super::ProtoReadResult>, tonic::Status>;
        #[doc = " Follower only. Called by the leader."]
        async fn replicate(
            &self,
            request: tonic::Request<super::ProtoReplicateReq>,
        ) -> Result<tonic::Response<super::ProtoReplicateResult>, tonic::Status>;
        async fn dump(
            &self,
            request: tonic::Request<super::ProtoDumpReq>,
        ) -> Result<tonic::Response<super::ProtoDumpResult>, tonic::Status>;
        async fn health(
            &self,
            request: tonic::Request<super::ProtoHealthReq>,
        ) -> Result<tonic::Response<super::ProtoHealthResult>, tonic::Status>;
    }
    #[doc = " One leader accepts writes and fans them out to a fixed set of followers."]
    #[doc = " Every node serves reads, dumps and health checks."]
    #[derive(Debug)]
    pub struct GrpcKvServer<T: GrpcKv> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcKv> GrpcKvServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcKvServer<T>
    where
        T: GrpcKv,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/kv.GrpcKv/Write" => {
                    #[allow(non_camel_case_types)]
                    struct WriteSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoWriteReq> for WriteSvc<T> {
                        type Response = super::ProtoWriteResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoWriteReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).write(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = WriteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kv.GrpcKv/Read" => {
                    #[allow(non_camel_case_types)]
                    struct ReadSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoReadReq> for ReadSvc<T> {
                        type Response = super::ProtoReadResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoReadReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).read(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ReadSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kv.GrpcKv/Replicate" => {
                    #[allow(non_camel_case_types)]
                    struct ReplicateSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoReplicateReq> for ReplicateSvc<T> {
                        type Response = super::ProtoReplicateResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoReplicateReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).replicate(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ReplicateSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kv.GrpcKv/Dump" => {
                    #[allow(non_camel_case_types)]
                    struct DumpSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoDumpReq> for DumpSvc<T> {
                        type Response = super::ProtoDumpResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDumpReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).dump(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DumpSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/kv.GrpcKv/Health" => {
                    #[allow(non_camel_case_types)]
                    struct HealthSvc<T: GrpcKv>(pub Arc<T>);
                    impl<T: GrpcKv> tonic::server::UnaryService<super::ProtoHealthReq> for HealthSvc<T> {
                        type Response = super::ProtoHealthResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoHealthReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).health(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = HealthSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcKv> Clone for GrpcKvServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcKv> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcKv> tonic::transport::NamedService for GrpcKvServer<T> {
        const NAME: &'static str = "kv.GrpcKv";
    }
}
