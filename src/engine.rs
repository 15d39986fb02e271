export![framebuffer, shader, texture, uniform_buffer];
