//! Project skeleton written by `init`.

pub const GO_MOD: &str = r#"module {{ repo }}

go {{ extra.go_version }}

require (
	k8s.io/apimachinery {{ extra.k8s_version }}
	k8s.io/client-go {{ extra.k8s_version }}
	sigs.k8s.io/controller-runtime {{ extra.controller_runtime }}
)
"#;

pub const BOILERPLATE: &str = "{{ boilerplate }}\n";

pub const MAIN: &str = r#"{{ boilerplate }}

package main

import (
	"flag"
	"os"

	"k8s.io/apimachinery/pkg/runtime"
	utilruntime "k8s.io/apimachinery/pkg/util/runtime"
	clientgoscheme "k8s.io/client-go/kubernetes/scheme"
	ctrl "sigs.k8s.io/controller-runtime"
	"sigs.k8s.io/controller-runtime/pkg/log/zap"
	// +kubeforge:scaffold:imports
)

var (
	scheme   = runtime.NewScheme()
	setupLog = ctrl.Log.WithName("setup")
)

func init() {
	utilruntime.Must(clientgoscheme.AddToScheme(scheme))

	// +kubeforge:scaffold:scheme
}

func main() {
	var enableLeaderElection bool
	flag.BoolVar(&enableLeaderElection, "leader-elect", false,
		"Enable leader election for controller manager. "+
			"Enabling this will ensure there is only one active controller manager.")
	opts := zap.Options{
		Development: true,
	}
	opts.BindFlags(flag.CommandLine)
	flag.Parse()

	ctrl.SetLogger(zap.New(zap.UseFlagOptions(&opts)))

	mgr, err := ctrl.NewManager(ctrl.GetConfigOrDie(), ctrl.Options{
		Scheme:           scheme,
		LeaderElection:   enableLeaderElection,
		LeaderElectionID: "{{ extra.leader_election_id }}",
	})
	if err != nil {
		setupLog.Error(err, "unable to start manager")
		os.Exit(1)
	}

	// +kubeforge:scaffold:builder

	setupLog.Info("starting manager")
	if err := mgr.Start(ctrl.SetupSignalHandler()); err != nil {
		setupLog.Error(err, "problem running manager")
		os.Exit(1)
	}
}
"#;

pub const MAKEFILE: &str = r#"# Image URL to use all building/pushing image targets
IMG ?= controller:latest

.PHONY: all
all: build

.PHONY: fmt
fmt:
	go fmt ./...

.PHONY: vet
vet:
	go vet ./...

.PHONY: test
test: fmt vet
	go test ./... -coverprofile cover.out

.PHONY: build
build: fmt vet
	go build -o bin/manager {{ extra.main }}

.PHONY: run
run: fmt vet
	go run ./{{ extra.main }}

.PHONY: docker-build
docker-build:
	docker build -t ${IMG} .
"#;

pub const DOCKERFILE: &str = r#"# Build the manager binary
FROM golang:{{ extra.go_version }} AS builder

WORKDIR /workspace
COPY go.mod go.mod
COPY go.sum go.sum
RUN go mod download

COPY . .
RUN CGO_ENABLED=0 GOOS=linux go build -a -o manager {{ extra.main }}

FROM gcr.io/distroless/static:nonroot
WORKDIR /
COPY --from=builder /workspace/manager .
USER 65532:65532

ENTRYPOINT ["/manager"]
"#;

pub const GITIGNORE: &str = r#"# Binaries for programs and plugins
bin/
*.exe
*.dll
*.so
*.dylib

# Test binary, build with `go test -c`
*.test

# Output of the go coverage tool
cover.out

# editor and IDE files
.idea
.vscode
*.swp
*~
"#;

pub const DEFAULT_KUSTOMIZATION: &str = r#"namespace: {{ project_name }}-system

namePrefix: {{ project_name }}-

resources:
- ../crd
- ../rbac
- ../manager
"#;

pub const MANAGER: &str = r#"apiVersion: v1
kind: Namespace
metadata:
  labels:
    control-plane: controller-manager
  name: system
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: controller-manager
  namespace: system
  labels:
    control-plane: controller-manager
spec:
  selector:
    matchLabels:
      control-plane: controller-manager
  replicas: 1
  template:
    metadata:
      labels:
        control-plane: controller-manager
    spec:
      containers:
      - command:
        - /manager
        args:
        - --leader-elect
        image: controller:latest
        name: manager
      terminationGracePeriodSeconds: 10
"#;

pub const RBAC_KUSTOMIZATION: &str = r#"# role.yaml is generated by controller-gen from the +kubebuilder:rbac markers.
resources:
# +kubeforge:scaffold:rbac
"#;

pub const SAMPLES_KUSTOMIZATION: &str = r#"## Append samples of your project ##
resources:
# +kubeforge:scaffold:manifestskustomizesamples
"#;
