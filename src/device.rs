export![camera, cross, device, display, upload];
