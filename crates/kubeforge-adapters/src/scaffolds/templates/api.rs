//! API package, CRD and sample manifests written by `create api`.

pub const GROUP_VERSION_INFO: &str = r#"{{ boilerplate }}

// Package {{ resource.version }} contains API Schema definitions for the {{ resource.group }} {{ resource.version }} API group
// +kubebuilder:object:generate=true
// +groupName={{ resource.qualified_group }}
package {{ resource.version }}

import (
	"k8s.io/apimachinery/pkg/runtime/schema"
	"sigs.k8s.io/controller-runtime/pkg/scheme"
)

var (
	// GroupVersion is group version used to register these objects
	GroupVersion = schema.GroupVersion{Group: "{{ resource.qualified_group }}", Version: "{{ resource.version }}"}

	// SchemeBuilder is used to add go types to the GroupVersionKind scheme
	SchemeBuilder = &scheme.Builder{GroupVersion: GroupVersion}

	// AddToScheme adds the types in this group-version to the given scheme.
	AddToScheme = SchemeBuilder.AddToScheme
)
"#;

pub const TYPES: &str = r#"{{ boilerplate }}

package {{ resource.version }}

import (
	metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"
)

// {{ resource.kind }}Spec defines the desired state of {{ resource.kind }}
type {{ resource.kind }}Spec struct {
	// Foo is an example field of {{ resource.kind }}. Edit {{ lower(resource.kind) }}_types.go to remove/update
	Foo string `json:"foo,omitempty"`
}

// {{ resource.kind }}Status defines the observed state of {{ resource.kind }}
type {{ resource.kind }}Status struct {
	// Important: Run "make" to regenerate code after modifying this file
}

// +kubebuilder:object:root=true
// +kubebuilder:subresource:status
{%- if not resource.namespaced %}
// +kubebuilder:resource:scope=Cluster
{%- endif %}
{%- if resource.short_names %}
// +kubebuilder:resource:shortName={% for name in resource.short_names %}{{ name }}{% if not loop.last %};{% endif %}{% endfor %}
{%- endif %}

// {{ resource.kind }} is the Schema for the {{ resource.plural }} API
type {{ resource.kind }} struct {
	metav1.TypeMeta   `json:",inline"`
	metav1.ObjectMeta `json:"metadata,omitempty"`

	Spec   {{ resource.kind }}Spec   `json:"spec,omitempty"`
	Status {{ resource.kind }}Status `json:"status,omitempty"`
}

// +kubebuilder:object:root=true

// {{ resource.kind }}List contains a list of {{ resource.kind }}
type {{ resource.kind }}List struct {
	metav1.TypeMeta `json:",inline"`
	metav1.ListMeta `json:"metadata,omitempty"`
	Items           []{{ resource.kind }} `json:"items"`
}

func init() {
	SchemeBuilder.Register(&{{ resource.kind }}{}, &{{ resource.kind }}List{})
}
"#;

pub const SAMPLE: &str = r#"apiVersion: {{ resource.qualified_group }}/{{ resource.version }}
kind: {{ resource.kind }}
metadata:
  name: {{ lower(resource.kind) }}-sample
spec:
  # Add fields here
  foo: bar
"#;

pub const CRD_KUSTOMIZATION: &str = r#"# This kustomization.yaml is not intended to be run by itself,
# since it depends on service name and namespace that are out of this kustomize package.
# It should be run by config/default
resources:
# +kubeforge:scaffold:crdkustomizeresource
"#;

/// Shared by the editor and viewer roles; `extra.role` and `extra.verbs` differ.
pub const CRD_ROLE: &str = r#"# permissions for end users to {{ extra.role }} {{ resource.plural }}.
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: {{ lower(resource.kind) }}-{{ extra.role }}-role
rules:
- apiGroups:
  - {{ resource.qualified_group }}
  resources:
  - {{ resource.plural }}
  verbs:
{%- for verb in extra.verbs %}
  - {{ verb }}
{%- endfor %}
- apiGroups:
  - {{ resource.qualified_group }}
  resources:
  - {{ resource.plural }}/status
  verbs:
  - get
"#;
