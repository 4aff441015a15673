pub const CONTROLLER: &str = r#"{{ boilerplate }}

package {{ extra.package_name }}

import (
	"context"

	"k8s.io/apimachinery/pkg/runtime"
	ctrl "sigs.k8s.io/controller-runtime"
	"sigs.k8s.io/controller-runtime/pkg/client"
	"sigs.k8s.io/controller-runtime/pkg/log"

	{{ resource.import_alias }} "{{ resource.package }}"
)

// {{ resource.kind }}Reconciler reconciles a {{ resource.kind }} object
type {{ resource.kind }}Reconciler struct {
	client.Client
	Scheme *runtime.Scheme
}

// +kubebuilder:rbac:groups={{ resource.qualified_group }},resources={{ resource.plural }},verbs=get;list;watch;create;update;patch;delete
// +kubebuilder:rbac:groups={{ resource.qualified_group }},resources={{ resource.plural }}/status,verbs=get;update;patch
// +kubebuilder:rbac:groups={{ resource.qualified_group }},resources={{ resource.plural }}/finalizers,verbs=update

// Reconcile moves the current state of the cluster closer to the desired state.
{%- if project_version == "2" %}
func (r *{{ resource.kind }}Reconciler) Reconcile(req ctrl.Request) (ctrl.Result, error) {
	ctx := context.Background()
{%- else %}
func (r *{{ resource.kind }}Reconciler) Reconcile(ctx context.Context, req ctrl.Request) (ctrl.Result, error) {
{%- endif %}
	_ = log.FromContext(ctx).WithValues("{{ lower(resource.kind) }}", req.NamespacedName)

	return ctrl.Result{}, nil
}

// SetupWithManager sets up the controller with the Manager.
func (r *{{ resource.kind }}Reconciler) SetupWithManager(mgr ctrl.Manager) error {
	return ctrl.NewControllerManagedBy(mgr).
		For(&{{ resource.import_alias }}.{{ resource.kind }}{}).
		Complete(r)
}
"#;

pub const SUITE_TEST: &str = r#"{{ boilerplate }}

package {{ extra.package_name }}

import (
	"path/filepath"
	"testing"

	. "github.com/onsi/ginkgo/v2"
	. "github.com/onsi/gomega"

	"k8s.io/client-go/kubernetes/scheme"
	"k8s.io/client-go/rest"
	"sigs.k8s.io/controller-runtime/pkg/client"
	"sigs.k8s.io/controller-runtime/pkg/envtest"
	// +kubeforge:scaffold:imports
)

var cfg *rest.Config
var k8sClient client.Client
var testEnv *envtest.Environment

func TestControllers(t *testing.T) {
	RegisterFailHandler(Fail)

	RunSpecs(t, "Controller Suite")
}

var _ = BeforeSuite(func() {
	testEnv = &envtest.Environment{
		CRDDirectoryPaths:     []string{filepath.Join({{ extra.crd_path }})},
		ErrorIfCRDPathMissing: true,
	}

	var err error
	cfg, err = testEnv.Start()
	Expect(err).NotTo(HaveOccurred())
	Expect(cfg).NotTo(BeNil())

	// +kubeforge:scaffold:scheme

	k8sClient, err = client.New(cfg, client.Options{Scheme: scheme.Scheme})
	Expect(err).NotTo(HaveOccurred())
	Expect(k8sClient).NotTo(BeNil())
})

var _ = AfterSuite(func() {
	err := testEnv.Stop()
	Expect(err).NotTo(HaveOccurred())
})
"#;
